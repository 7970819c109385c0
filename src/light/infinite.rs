//! The environment light: a texture indexed by direction, sampled over the
//! hemisphere aligned with the shading normal rather than the full sphere
//! (no importance-resampling distribution over the map, unlike a full
//! environment-map importance sampler — see `DESIGN.md`).

use crate::interaction::Interaction;
use crate::light::{Light, LightKind, LightSample};
use crate::math::coordinate_system;
use crate::sampling::{uniform_hemisphere_pdf, uniform_sample_hemisphere};
use crate::spectrum::Rgb;
use crate::texture::Texture;
use crate::{Float, Point2f, Vec3f};
use cgmath::InnerSpace;
use std::f32::consts::PI;
use std::sync::Arc;

/// Maps a world-space direction to the texture's `(u, v)`, per the
/// convention `u = 1 - atan2(y, x)/(2*pi)`, `v = 1 - acos(z)/pi`.
fn direction_to_uv(w: Vec3f) -> Point2f {
    let u = 1.0 - (w.y.atan2(w.x) + PI) / (2.0 * PI);
    let v = 1.0 - w.z.clamp(-1.0, 1.0).acos() / PI;
    Point2f::new(u, v)
}

pub struct InfiniteAreaLight {
    radiance: Arc<dyn Texture<Rgb>>,
    world_radius: Float,
}

impl InfiniteAreaLight {
    pub fn new(radiance: impl Texture<Rgb> + 'static, world_radius: Float) -> Self {
        Self { radiance: Arc::new(radiance), world_radius }
    }

    fn eval_direction(&self, w: Vec3f) -> Rgb {
        let uv = direction_to_uv(w);
        let zero = crate::Vec2f::new(0.0, 0.0);
        self.radiance.eval(uv, zero, zero)
    }
}

impl Light for InfiniteAreaLight {
    fn kind(&self) -> LightKind {
        LightKind::Infinite
    }

    fn sample(&self, reference: &Interaction, u: Point2f) -> LightSample {
        let (tangent, bitangent) = coordinate_system(reference.ns.0);
        let local = uniform_sample_hemisphere(u);
        let wi = (tangent * local.x + bitangent * local.y + reference.ns.0 * local.z).normalize();
        let point_on_light = reference.point + wi * (2.0 * self.world_radius);
        LightSample {
            wi,
            point_on_light,
            radiance: self.eval_direction(wi),
            pdf: uniform_hemisphere_pdf(),
            kind: LightKind::Infinite,
        }
    }

    fn eval(&self, ray: &crate::geometry::Ray) -> Rgb {
        self.eval_direction(ray.dir)
    }

    fn power(&self) -> Rgb {
        // No full importance-sampling distribution is built over the map
        // (see module docs), so power is estimated from a handful of axis
        // directions rather than a proper integral; this light is normally
        // queried as the scene's `global_light`, not through the
        // power-weighted picking distribution.
        let axes = [
            Vec3f::new(1.0, 0.0, 0.0),
            Vec3f::new(-1.0, 0.0, 0.0),
            Vec3f::new(0.0, 1.0, 0.0),
            Vec3f::new(0.0, -1.0, 0.0),
            Vec3f::new(0.0, 0.0, 1.0),
            Vec3f::new(0.0, 0.0, -1.0),
        ];
        let avg: Rgb = axes.iter().map(|&w| self.eval_direction(w)).sum::<Rgb>() / axes.len() as Float;
        avg * (4.0 * PI * self.world_radius * self.world_radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::ConstantTexture;
    use crate::{Normal3, Point3f};

    #[test]
    fn uniform_environment_samples_constant_radiance() {
        let light = InfiniteAreaLight::new(ConstantTexture(Rgb::new(2.0)), 100.0);
        let n = Normal3::new(0.0, 0.0, 1.0);
        let ia = Interaction::new(0.0, Point3f::new(0.0, 0.0, 0.0), n, n, Point2f::new(0.0, 0.0));
        let sample = light.sample(&ia, Point2f::new(0.3, 0.6));
        assert_eq!(sample.radiance, Rgb::new(2.0));
        assert!((sample.pdf - uniform_hemisphere_pdf()).abs() < 1e-6);
    }

    #[test]
    fn sampled_direction_stays_in_normal_hemisphere() {
        let light = InfiniteAreaLight::new(ConstantTexture(Rgb::new(1.0)), 10.0);
        let n = Normal3::new(0.0, 0.0, 1.0);
        let ia = Interaction::new(0.0, Point3f::new(0.0, 0.0, 0.0), n, n, Point2f::new(0.0, 0.0));
        let mut rng = crate::rng::Rng::new(3);
        for _ in 0..100 {
            let sample = light.sample(&ia, rng.uniform_2d());
            assert!(sample.wi.dot(n.0) >= -1e-6);
        }
    }
}
