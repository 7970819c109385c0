//! Pure diffuse (Lambertian) material: an albedo texture, nothing else.

use crate::interaction::Interaction;
use crate::material::Material;
use crate::reflection::bsdf::Bsdf;
use crate::reflection::LambertianReflection;
use crate::spectrum::Rgb;
use crate::texture::Texture;
use crate::workspace::Workspace;
use std::sync::Arc;

pub struct MatteMaterial {
    diffuse: Arc<dyn Texture<Rgb>>,
}

impl MatteMaterial {
    pub fn new(diffuse: impl Texture<Rgb> + 'static) -> Self {
        Self { diffuse: Arc::new(diffuse) }
    }
}

impl Material for MatteMaterial {
    fn compute_bsdf<'w>(&self, workspace: &'w Workspace, interaction: &Interaction) -> &'w Bsdf<'w> {
        let mut bsdf = Bsdf::new(interaction.ns, interaction.ng);

        let r = self.diffuse.eval(interaction.uv, crate::Vec2f::new(0.0, 0.0), crate::Vec2f::new(0.0, 0.0));
        if !r.is_black() {
            let lambertian = workspace.construct(LambertianReflection::new(r));
            bsdf.add(lambertian);
        }
        workspace.construct(bsdf)
    }
}
