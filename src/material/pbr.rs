//! The glTF-style metallic-roughness material described in the external
//! `SceneMaterial` interface: a single `base_color` texture blended between
//! a diffuse lobe and a tinted microfacet lobe by the `metallic` factor,
//! plus an `emissive` term the scene builder reads separately to drive an
//! area light (emission is not itself part of the BSDF).
//!
//! Grounded in the combination pattern of [`super::metal::MetalMaterial`]
//! (microfacet + conductor Fresnel) and the teacher's plastic material
//! (diffuse + specular split by a blend factor), adapted to glTF's
//! dielectric-specular-floor convention (`F0 = lerp(0.04, base_color,
//! metallic)`).

use crate::fresnel::FresnelConductor;
use crate::interaction::Interaction;
use crate::material::Material;
use crate::reflection::bsdf::Bsdf;
use crate::reflection::microfacet::GgxDistribution;
use crate::reflection::{LambertianReflection, MicrofacetReflection};
use crate::spectrum::Rgb;
use crate::texture::Texture;
use crate::workspace::Workspace;
use crate::Float;
use std::sync::Arc;

/// The dielectric floor reflectance glTF specifies for a fully non-metallic
/// surface (4% normal-incidence reflectance).
const DIELECTRIC_F0: Float = 0.04;

pub struct MetallicRoughnessMaterial {
    base_color: Arc<dyn Texture<Rgb>>,
    emissive: Rgb,
    metallic: Float,
    roughness: Float,
}

impl MetallicRoughnessMaterial {
    pub fn new(base_color: impl Texture<Rgb> + 'static, emissive: Rgb, metallic: Float, roughness: Float) -> Self {
        Self { base_color: Arc::new(base_color), emissive, metallic: metallic.clamp(0.0, 1.0), roughness: roughness.clamp(0.0, 1.0) }
    }

    /// Emitted radiance at this material's surface, read by the scene
    /// builder (outside this core) to size an area light's intensity.
    pub fn emissive(&self) -> Rgb {
        self.emissive
    }
}

impl Material for MetallicRoughnessMaterial {
    fn compute_bsdf<'w>(&self, workspace: &'w Workspace, interaction: &Interaction) -> &'w Bsdf<'w> {
        let mut bsdf = Bsdf::new(interaction.ns, interaction.ng);

        let base_color = self.base_color.eval(interaction.uv, crate::Vec2f::new(0.0, 0.0), crate::Vec2f::new(0.0, 0.0));
        let diffuse = base_color * (1.0 - self.metallic);
        let f0 = Rgb::new(DIELECTRIC_F0) * (1.0 - self.metallic) + base_color * self.metallic;

        if !diffuse.is_black() {
            let lambertian = workspace.construct(LambertianReflection::new(diffuse));
            bsdf.add(lambertian);
        }

        let distribution = GgxDistribution::from_roughness(self.roughness);
        let fresnel = FresnelConductor::new(f0);
        let specular = workspace.construct(MicrofacetReflection::new(Rgb::new(1.0), distribution, fresnel));
        bsdf.add(specular);

        workspace.construct(bsdf)
    }
}
