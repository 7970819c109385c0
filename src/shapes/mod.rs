use crate::geometry::bounds::Bounds3f;
use crate::geometry::Ray;
use crate::interaction::Interaction;
use crate::{Float, Normal3, Point2f, Point3f};

pub mod disk;
pub mod rectangle;
pub mod sphere;
pub mod triangle;

/// A shape bakes its world-space placement in at construction time (mesh
/// vertices and analytic parameters alike), so `intersect` never needs to
/// transform the ray into an object frame.
pub trait Shape {
    fn area(&self) -> Float;

    fn bounds(&self) -> Bounds3f;

    /// Finds the smallest `t` in `(t_min, t_max]` at which `ray` crosses the
    /// surface, populating every geometric field of the returned
    /// interaction. Back-references (`primitive`/`material`/`area_light`)
    /// are left unset; the primitive layer fills those in.
    fn intersect(&self, ray: &Ray, t_min: Float, t_max: Float) -> Option<Interaction<'static>>;

    /// Same predicate as `intersect` without building the full interaction;
    /// returns the hit distance.
    fn occlude(&self, ray: &Ray, t_min: Float, t_max: Float) -> Option<Float>;

    /// Uniform-by-area point sample: `(point, outward normal, pdf)`.
    fn sample_point(&self, u: Point2f) -> (Point3f, Normal3, Float);
}
