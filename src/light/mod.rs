//! Light source contracts.
//!
//! Every light exposes `sample`, and area/infinite lights additionally
//! expose `eval` for rays that escape to them directly (hit an emissive
//! surface, or miss the scene into the environment).

use crate::interaction::Interaction;
use crate::scene::Scene;
use crate::{Float, Normal3, Point2f, Point3f, Vec3f};

pub mod diffuse;
pub mod distant;
pub mod infinite;
pub mod point;
pub mod spot;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightKind {
    DeltaPoint,
    DeltaDirection,
    Area,
    Infinite,
}

impl LightKind {
    pub fn is_delta(self) -> bool {
        matches!(self, LightKind::DeltaPoint | LightKind::DeltaDirection)
    }
}

pub struct LightSample {
    /// Direction from the shading point toward the light, in world space.
    pub wi: Vec3f,
    pub point_on_light: Point3f,
    pub radiance: crate::spectrum::Rgb,
    pub pdf: Float,
    pub kind: LightKind,
}

pub trait Light: Sync + Send {
    fn kind(&self) -> LightKind;

    fn sample(&self, reference: &Interaction, u: Point2f) -> LightSample;

    /// Radiance seen by a ray that escapes the scene without hitting
    /// anything; only meaningful for `Infinite` lights (zero otherwise).
    fn eval(&self, ray: &crate::geometry::Ray) -> crate::spectrum::Rgb {
        let _ = ray;
        crate::spectrum::Rgb::BLACK
    }

    /// Radiance emitted by an `Area` light toward direction `w` (world
    /// space, pointing away from the emitting surface) at a hit whose
    /// geometric normal is `ng`. Zero for every other light kind.
    fn l_emitted(&self, ng: Normal3, w: Vec3f) -> crate::spectrum::Rgb {
        let _ = (ng, w);
        crate::spectrum::Rgb::BLACK
    }

    /// Total emitted power, used to build the scene's light-picking
    /// distribution.
    fn power(&self) -> crate::spectrum::Rgb;
}

/// Traces a shadow ray for a light sample and reports whether the light is
/// unobstructed. Delta lights (point/spot/distant) compare against the
/// distance to the sampled point; infinite lights trace to `t_max = 1e8`.
pub fn unoccluded(scene: &Scene, from: &Interaction, sample: &LightSample, is_infinite: bool) -> bool {
    if is_infinite {
        let ray = from.spawn_ray(sample.wi);
        !scene.intersect_occlude(&ray, 1e8)
    } else {
        let (ray, t_max) = from.spawn_ray_to(sample.point_on_light);
        !scene.intersect_occlude(&ray, t_max)
    }
}
