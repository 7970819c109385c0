//! Rough metal: a Cook-Torrance GGX lobe tinted by a conductor Fresnel
//! whose normal-incidence reflectance is given directly as an RGB `r0`
//! (spec's tri-component radiance model has no complex index of
//! refraction to derive one from).

use crate::fresnel::FresnelConductor;
use crate::interaction::Interaction;
use crate::material::Material;
use crate::reflection::bsdf::Bsdf;
use crate::reflection::microfacet::GgxDistribution;
use crate::reflection::MicrofacetReflection;
use crate::spectrum::Rgb;
use crate::texture::Texture;
use crate::workspace::Workspace;
use crate::Float;
use std::sync::Arc;

pub struct MetalMaterial {
    r0: Arc<dyn Texture<Rgb>>,
    roughness: Arc<dyn Texture<Float>>,
}

impl MetalMaterial {
    pub fn new(r0: impl Texture<Rgb> + 'static, roughness: impl Texture<Float> + 'static) -> Self {
        Self { r0: Arc::new(r0), roughness: Arc::new(roughness) }
    }
}

impl Material for MetalMaterial {
    fn compute_bsdf<'w>(&self, workspace: &'w Workspace, interaction: &Interaction) -> &'w Bsdf<'w> {
        let mut bsdf = Bsdf::new(interaction.ns, interaction.ng);

        let r0 = self.r0.eval(interaction.uv, crate::Vec2f::new(0.0, 0.0), crate::Vec2f::new(0.0, 0.0));
        let roughness = self.roughness.eval(interaction.uv, crate::Vec2f::new(0.0, 0.0), crate::Vec2f::new(0.0, 0.0));
        let distribution = GgxDistribution::from_roughness(roughness);
        let fresnel = FresnelConductor::new(r0);
        let reflection = workspace.construct(MicrofacetReflection::new(Rgb::new(1.0), distribution, fresnel));
        bsdf.add(reflection);

        workspace.construct(bsdf)
    }
}
