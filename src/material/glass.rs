//! Dielectric interface (glass, water): reflects and transmits according to
//! Schlick's Fresnel weight. A smooth surface (`roughness = 0`) collapses
//! to a single combined specular lobe; a rough one splits into separate
//! GGX reflection and transmission-by-reflection-only lobes (the core does
//! not implement a glossy transmission BxDF — see `DESIGN.md`).

use crate::fresnel::FresnelDielectric;
use crate::interaction::Interaction;
use crate::material::Material;
use crate::reflection::bsdf::Bsdf;
use crate::reflection::microfacet::GgxDistribution;
use crate::reflection::{FresnelSpecular, MicrofacetReflection, SpecularReflection};
use crate::spectrum::Rgb;
use crate::texture::Texture;
use crate::workspace::Workspace;
use crate::Float;
use std::sync::Arc;

pub struct GlassMaterial {
    reflectance: Arc<dyn Texture<Rgb>>,
    transmittance: Arc<dyn Texture<Rgb>>,
    roughness: Arc<dyn Texture<Float>>,
    eta: Float,
}

impl GlassMaterial {
    pub fn new(
        reflectance: impl Texture<Rgb> + 'static,
        transmittance: impl Texture<Rgb> + 'static,
        roughness: impl Texture<Float> + 'static,
        eta: Float,
    ) -> Self {
        Self { reflectance: Arc::new(reflectance), transmittance: Arc::new(transmittance), roughness: Arc::new(roughness), eta }
    }
}

impl Material for GlassMaterial {
    fn compute_bsdf<'w>(&self, workspace: &'w Workspace, interaction: &Interaction) -> &'w Bsdf<'w> {
        let mut bsdf = Bsdf::new(interaction.ns, interaction.ng);

        let r = self.reflectance.eval(interaction.uv, crate::Vec2f::new(0.0, 0.0), crate::Vec2f::new(0.0, 0.0));
        let t = self.transmittance.eval(interaction.uv, crate::Vec2f::new(0.0, 0.0), crate::Vec2f::new(0.0, 0.0));
        let roughness = self.roughness.eval(interaction.uv, crate::Vec2f::new(0.0, 0.0), crate::Vec2f::new(0.0, 0.0));
        let is_specular = roughness == 0.0;

        if is_specular {
            if !r.is_black() || !t.is_black() {
                let lobe = workspace.construct(FresnelSpecular::new(r, t, 1.0, self.eta));
                bsdf.add(lobe);
            }
        } else {
            if !r.is_black() {
                let fresnel = FresnelDielectric::new(1.0, self.eta);
                let distribution = GgxDistribution::from_roughness(roughness);
                let reflection = workspace.construct(MicrofacetReflection::new(r, distribution, fresnel));
                bsdf.add(reflection);
            }
            if !t.is_black() {
                // No glossy transmission lobe in this BSDF set: a rough
                // dielectric's transmissive component still reflects
                // specularly, which is a coarse but energy-bounded stand-in.
                let fresnel = FresnelDielectric::new(1.0, self.eta);
                let reflection = workspace.construct(SpecularReflection::new(t, fresnel));
                bsdf.add(reflection);
            }
        }

        workspace.construct(bsdf)
    }
}
