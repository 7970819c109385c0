//! A perfect mirror: `SpecularReflection` with no Fresnel attenuation.

use crate::fresnel::{Fresnel, FresnelConductor};
use crate::interaction::Interaction;
use crate::material::Material;
use crate::reflection::bsdf::Bsdf;
use crate::reflection::SpecularReflection;
use crate::spectrum::Rgb;
use crate::texture::Texture;
use crate::workspace::Workspace;
use crate::Float;
use std::sync::Arc;

/// A Fresnel that always reports full reflectance; used by the mirror
/// material, which has no physical interface to attenuate.
struct FresnelNoOp;

impl Fresnel for FresnelNoOp {
    fn evaluate(&self, _cos_i: Float) -> Rgb {
        Rgb::new(1.0)
    }
}

pub struct MirrorMaterial {
    reflectance: Arc<dyn Texture<Rgb>>,
}

impl MirrorMaterial {
    pub fn new(reflectance: impl Texture<Rgb> + 'static) -> Self {
        Self { reflectance: Arc::new(reflectance) }
    }
}

impl Material for MirrorMaterial {
    fn compute_bsdf<'w>(&self, workspace: &'w Workspace, interaction: &Interaction) -> &'w Bsdf<'w> {
        let mut bsdf = Bsdf::new(interaction.ns, interaction.ng);
        let r = self.reflectance.eval(interaction.uv, crate::Vec2f::new(0.0, 0.0), crate::Vec2f::new(0.0, 0.0));
        if !r.is_black() {
            let reflection = workspace.construct(SpecularReflection::new(r, FresnelNoOp));
            bsdf.add(reflection);
        }
        workspace.construct(bsdf)
    }
}

/// Tinted mirror driven by a conductor Fresnel, used for colored metal
/// reflectors that stay perfectly smooth (`roughness = 0`) — the specular
/// degenerate case of [`crate::material::metal::MetalMaterial`].
pub struct TintedMirrorMaterial {
    r0: Rgb,
}

impl TintedMirrorMaterial {
    pub fn new(r0: Rgb) -> Self {
        Self { r0 }
    }
}

impl Material for TintedMirrorMaterial {
    fn compute_bsdf<'w>(&self, workspace: &'w Workspace, interaction: &Interaction) -> &'w Bsdf<'w> {
        let mut bsdf = Bsdf::new(interaction.ns, interaction.ng);
        let reflection = workspace.construct(SpecularReflection::new(Rgb::new(1.0), FresnelConductor::new(self.r0)));
        bsdf.add(reflection);
        workspace.construct(bsdf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::ConstantTexture;
    use crate::{Normal3, Point2f, Point3f};

    #[test]
    fn mirror_bsdf_is_purely_specular() {
        let mat = MirrorMaterial::new(ConstantTexture(Rgb::new(0.9)));
        let workspace = Workspace::new();
        let n = Normal3::new(0.0, 0.0, 1.0);
        let ia = Interaction::new(1.0, Point3f::new(0.0, 0.0, 0.0), n, n, Point2f::new(0.0, 0.0));
        let bsdf = mat.compute_bsdf(&workspace, &ia);
        assert!(bsdf.bsdf_type().is_specular());
    }
}
