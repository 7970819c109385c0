//! The path-tracing estimator: per-bounce direct-light sampling over every
//! light in the scene plus BSDF-sampled indirect continuation, no MIS
//! between the two (spec §4.J / §9 "MIS is not performed").

use crate::geometry::Ray;
use crate::interaction::Interaction;
use crate::light::{unoccluded, LightKind};
use crate::reflection::bsdf::Bsdf;
use crate::rng::Rng;
use crate::scene::Scene;
use crate::spectrum::Rgb;
use crate::workspace::Workspace;
use crate::Vec3f;

pub struct PathIntegrator {
    min_bounces: u32,
    max_bounces: u32,
}

impl PathIntegrator {
    pub fn new(min_bounces: u32, max_bounces: u32) -> Self {
        Self { min_bounces, max_bounces }
    }

    /// Estimates incident radiance along `ray`, per spec §4.J steps 1-11.
    pub fn li(&self, mut ray: Ray, scene: &Scene, rng: &mut Rng, workspace: &mut Workspace) -> Rgb {
        let mut beta = Rgb::new(1.0);
        let mut l = Rgb::BLACK;
        let mut from_camera_or_specular = true;
        let mut bounce = 0u32;

        loop {
            workspace.reset();

            let isect = match scene.intersect(&ray) {
                Some(isect) => isect,
                None => {
                    if let Some(global_light) = scene.global_light() {
                        l += beta * global_light.eval(&ray);
                    }
                    break;
                }
            };

            if from_camera_or_specular {
                if let Some(area_light) = isect.area_light {
                    l += beta * area_light.l_emitted(isect.ng, -ray.dir);
                }
            }

            let material = match isect.material {
                Some(material) => material,
                None => break,
            };

            let bsdf = material.compute_bsdf(workspace, &isect);
            let wo_local = bsdf.world_to_local(-ray.dir);
            from_camera_or_specular = bsdf.bsdf_type().is_specular();

            if !from_camera_or_specular {
                l += beta * sample_all_lights(&isect, bsdf, wo_local, scene, rng);
            }

            let (wi_local, f, pdf, _) = match bsdf.sample(rng.uniform_2d(), wo_local) {
                Some(sample) => sample,
                None => break,
            };
            if pdf == 0.0 || f.is_black() {
                break;
            }

            beta *= f * wi_local.z.abs() / pdf;
            ray = isect.spawn_ray(bsdf.local_to_world(wi_local));

            if bounce >= self.min_bounces {
                let q = beta.max_component().min(1.0);
                if rng.uniform_f32() > q {
                    break;
                }
                beta = beta / q;
            }
            if bounce == self.max_bounces {
                break;
            }
            bounce += 1;
        }

        l
    }
}

impl Default for PathIntegrator {
    fn default() -> Self {
        Self::new(2, 6)
    }
}

/// Step 8: loop over every light in the scene (deliberately not a single
/// power-sampled light; see the design notes this algorithm is grounded on).
fn sample_all_lights(isect: &Interaction, bsdf: &Bsdf, wo_local: Vec3f, scene: &Scene, rng: &mut Rng) -> Rgb {
    let mut l = Rgb::BLACK;
    for light in scene.lights() {
        let sample = light.sample(isect, rng.uniform_2d());
        if sample.pdf <= 0.0 || sample.radiance.is_black() {
            continue;
        }
        let wi_local = bsdf.world_to_local(sample.wi);
        let f = bsdf.eval(wo_local, wi_local) * wi_local.z.abs();
        if f.is_black() {
            continue;
        }
        let is_infinite = matches!(light.kind(), LightKind::Infinite | LightKind::DeltaDirection);
        if unoccluded(scene, isect, &sample, is_infinite) {
            l += f * sample.radiance / sample.pdf;
        }
    }
    l
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::light::infinite::InfiniteAreaLight;
    use crate::rng::Rng;
    use crate::texture::ConstantTexture;
    use crate::workspace::Workspace;
    use crate::Point3f;
    use cgmath::InnerSpace;
    use std::sync::Arc;

    /// S1: an empty scene lit only by a constant environment returns exactly
    /// that radiance for every primary ray.
    #[test]
    fn empty_scene_returns_environment_radiance() {
        let env: Arc<dyn crate::light::Light> = Arc::new(InfiniteAreaLight::new(ConstantTexture(Rgb::new(0.5)), 100.0));
        let scene = Scene::commit(Vec::new(), Vec::new(), Some(env));

        let integrator = PathIntegrator::default();
        let mut rng = Rng::new(1);
        let mut workspace = Workspace::new();

        let ray = Ray::new(Point3f::new(0.0, 0.0, 0.0), Vec3f::new(0.0, 0.0, 1.0).normalize());
        let l = integrator.li(ray, &scene, &mut rng, &mut workspace);
        assert_eq!(l, Rgb::new(0.5));
    }
}
