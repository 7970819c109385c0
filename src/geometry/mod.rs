pub mod bounds;
pub mod transform;

use crate::{Point3f, Vec3f};

pub use self::transform::Transform;

/// A ray with a unit-length direction. `t_min`/`t_max` bounds are passed as
/// explicit parameters to intersection routines rather than stored here, so
/// a single `Ray` value can be reused across several queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Point3f,
    pub dir: Vec3f,
}

impl Ray {
    pub fn new(origin: Point3f, dir: Vec3f) -> Self {
        debug_assert!(
            (cgmath::InnerSpace::magnitude(dir) - 1.0).abs() < 1e-3,
            "ray direction must be unit length"
        );
        Self { origin, dir }
    }

    pub fn at(&self, t: crate::Float) -> Point3f {
        self.origin + self.dir * t
    }
}
