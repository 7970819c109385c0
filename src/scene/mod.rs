//! Owns every primitive and light for one render and exposes the two
//! ray queries the integrator needs. Immutable once `commit` returns, so a
//! single `Scene` is shared read-only across worker threads.

use crate::bvh::Bvh;
use crate::geometry::bounds::Bounds3f;
use crate::geometry::Ray;
use crate::interaction::Interaction;
use crate::light::Light;
use crate::sampling::DiscreteDistribution;
use crate::primitive::Primitive;
use crate::Float;
use std::sync::Arc;

/// Closest a primary or secondary ray is allowed to self-intersect at.
pub const T_MIN: Float = 1e-3;
/// Stand-in for "infinity" in ray queries against an unbounded scene.
pub const T_MAX: Float = 1e8;

pub struct Scene {
    bvh: Bvh<Box<dyn Primitive>>,
    lights: Vec<Arc<dyn Light>>,
    global_light: Option<Arc<dyn Light>>,
    light_distribution: DiscreteDistribution,
}

impl Scene {
    /// The one-time commit phase: finalizes the acceleration structure and
    /// rebuilds the light-picking distribution from each light's reported
    /// `power()`. Not thread-safe; must complete before any `intersect`.
    #[tracing::instrument(skip(primitives, lights, global_light), fields(n_prims = primitives.len(), n_lights = lights.len()))]
    pub fn commit(
        primitives: Vec<Box<dyn Primitive>>,
        lights: Vec<Arc<dyn Light>>,
        global_light: Option<Arc<dyn Light>>,
    ) -> Self {
        let weights: Vec<Float> = lights.iter().map(|l| l.power().avg()).collect();
        let light_distribution = DiscreteDistribution::new(&weights);
        let bvh = Bvh::build(primitives);
        tracing::debug!("scene committed");
        Self { bvh, lights, global_light, light_distribution }
    }

    /// Nearest hit on `[T_MIN, T_MAX]`.
    pub fn intersect(&self, ray: &Ray) -> Option<Interaction> {
        self.bvh.intersect(ray, T_MIN, T_MAX)
    }

    /// Any-hit predicate on `[T_MIN, t_max]`.
    pub fn intersect_occlude(&self, ray: &Ray, t_max: Float) -> bool {
        self.bvh.occlude(ray, T_MIN, t_max)
    }

    pub fn lights(&self) -> &[Arc<dyn Light>] {
        &self.lights
    }

    pub fn global_light(&self) -> Option<&dyn Light> {
        self.global_light.as_deref()
    }

    pub fn bounds(&self) -> Bounds3f {
        self.bvh.bounds()
    }

    /// Draws a light weighted by power, returning it and its probability
    /// mass. `None` only when the scene has no lights at all.
    pub fn sample_light(&self, u: Float) -> Option<(&dyn Light, Float)> {
        if self.lights.is_empty() {
            return None;
        }
        let (index, pmf) = self.light_distribution.sample(u);
        Some((self.lights[index].as_ref(), pmf))
    }
}
