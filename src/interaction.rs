//! The record produced at a ray-surface hit, and nothing else: every
//! reference it carries is weak (lookup-only), since ownership lives in the
//! `Scene` and the primitive's own material/area-light slots.

use crate::geometry::Ray;
use crate::light::Light;
use crate::material::Material;
use crate::primitive::Primitive;
use crate::{Float, Normal3, Point2f, Point3f, Vec3f};

/// Points are nudged off the surface by this much along the geometric
/// normal before a new ray is spawned, to avoid immediately re-intersecting
/// the same surface due to floating point rounding.
const RAY_EPSILON: Float = 1e-4;

#[derive(Clone, Copy)]
pub struct Interaction<'s> {
    pub t: Float,
    pub point: Point3f,
    pub ng: Normal3,
    pub ns: Normal3,
    pub uv: Point2f,
    pub face_index: u32,
    pub primitive: Option<&'s dyn Primitive>,
    pub material: Option<&'s dyn Material>,
    pub area_light: Option<&'s dyn Light>,
}

impl<'s> Interaction<'s> {
    pub fn new(t: Float, point: Point3f, ng: Normal3, ns: Normal3, uv: Point2f) -> Self {
        Self { t, point, ng, ns, uv, face_index: 0, primitive: None, material: None, area_light: None }
    }

    pub fn with_face_index(mut self, face_index: u32) -> Self {
        self.face_index = face_index;
        self
    }

    /// Negates `ng`/`ns` and flips `uv` to `1 - uv`, per the
    /// reverse-orientation contract.
    pub fn reverse_orientation(mut self) -> Self {
        self.ng = -self.ng;
        self.ns = -self.ns;
        self.uv = Point2f::new(1.0 - self.uv.x, 1.0 - self.uv.y);
        self
    }

    /// Offsets the hit point along the geometric normal, on the same side
    /// as `dir`, and builds a ray leaving the surface in that direction.
    pub fn spawn_ray(&self, dir: Vec3f) -> Ray {
        let offset = if self.ng.dot(dir) >= 0.0 { self.ng.0 } else { -self.ng.0 };
        Ray::new(self.point + offset * RAY_EPSILON, dir)
    }

    /// Builds a ray from this point toward another point, stopping just
    /// short of it so the far surface is not spuriously missed.
    pub fn spawn_ray_to(&self, target: Point3f) -> (Ray, Float) {
        use cgmath::InnerSpace;
        let d = target - self.point;
        let dist = d.magnitude();
        (self.spawn_ray(d / dist), dist * (1.0 - 1e-3))
    }
}
