use crate::err_float::gamma;
use crate::geometry::Ray;
use crate::{Float, Point3f, Vec3f};
use cgmath::{EuclideanSpace, InnerSpace};
use std::mem::swap;

pub type Bounds3f = Bounds3;

/// Axis-aligned bounding box, `min <= max` component-wise.
#[derive(Clone, Copy, PartialEq)]
pub struct Bounds3 {
    pub min: Point3f,
    pub max: Point3f,
}

impl Bounds3 {
    pub fn with_bounds(min: Point3f, max: Point3f) -> Self {
        Self { min, max }
    }

    pub fn empty() -> Self {
        Self::with_bounds(
            Point3f::new(Float::INFINITY, Float::INFINITY, Float::INFINITY),
            Point3f::new(Float::NEG_INFINITY, Float::NEG_INFINITY, Float::NEG_INFINITY),
        )
    }

    pub fn join(&self, other: &Self) -> Self {
        Self::with_bounds(
            Point3f::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            Point3f::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        )
    }

    pub fn join_point(&self, point: &Point3f) -> Self {
        Self::with_bounds(
            Point3f::new(
                self.min.x.min(point.x),
                self.min.y.min(point.y),
                self.min.z.min(point.z),
            ),
            Point3f::new(
                self.max.x.max(point.x),
                self.max.y.max(point.y),
                self.max.z.max(point.z),
            ),
        )
    }

    pub fn centroid(&self) -> Point3f {
        self.min + self.diagonal() * 0.5
    }

    pub fn diagonal(&self) -> Vec3f {
        self.max - self.min
    }

    /// Radius/center of a bounding sphere enclosing this box.
    pub fn bounding_sphere(&self) -> (Point3f, Float) {
        let center = self.centroid();
        let radius = if self.is_point() { 0.0 } else { (self.max - center).magnitude() };
        (center, radius)
    }

    pub fn maximum_extent(&self) -> u8 {
        let d = self.diagonal();
        if d.x > d.y && d.x > d.z {
            0
        } else if d.y > d.z {
            1
        } else {
            2
        }
    }

    pub fn is_point(&self) -> bool {
        self.max == self.min
    }

    pub fn offset(&self, p: &Point3f) -> Vec3f {
        let mut o = p - self.min;
        if self.max.x > self.min.x { o.x /= self.max.x - self.min.x };
        if self.max.y > self.min.y { o.y /= self.max.y - self.min.y };
        if self.max.z > self.min.z { o.z /= self.max.z - self.min.z };
        o
    }

    /// Robust slab test: computes `t = (p - o)/d` per axis, growing the far
    /// hit to account for floating point error, and rejects empty or
    /// out-of-range intervals against `[t_min, t_max]`.
    pub fn intersect_test(&self, ray: &Ray, t_min: Float, t_max: Float) -> Option<(Float, Float)> {
        let mut t0 = t_min;
        let mut t1 = t_max;

        for i in 0..3 {
            let inv_ray_dir = 1.0 / ray.dir[i];
            let mut t_near = (self.min[i] - ray.origin[i]) * inv_ray_dir;
            let mut t_far = (self.max[i] - ray.origin[i]) * inv_ray_dir;

            if t_near.is_nan() || t_far.is_nan() {
                return None;
            }

            if t_near > t_far { swap(&mut t_near, &mut t_far) }

            t_far *= 1.0 + 2.0 * gamma(3);

            t0 = Float::max(t0, t_near);
            t1 = Float::min(t1, t_far);
            if t0 > t1 { return None; }
        }
        Some((t0, t1))
    }
}

impl std::fmt::Debug for Bounds3 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Bounds3f[{:?}, {:?}]", self.min, self.max)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_bounds3f_intersect() {
        let bounds = Bounds3::with_bounds(Point3f::new(1.0, 1.0, 1.0), Point3f::new(2.0, 2.0, 2.0));
        let ray = Ray::new(Point3f::new(0.0, 0.0, 0.0), Vec3f::new(1.0, 1.0, 1.0).normalize());
        let hit = bounds.intersect_test(&ray, 0.0, Float::INFINITY).unwrap();
        assert!((hit.0 - 3f32.sqrt()).abs() < 1e-4);
        assert!((hit.1 - 2.0 * 3f32.sqrt()).abs() < 1e-4);

        // zero component direction
        let bounds = Bounds3::with_bounds(Point3f::new(-0.5, -0.5, -0.5), Point3f::new(0.5, 0.5, 0.5));
        let ray = Ray::new(Point3f::new(0.0, 0.0, -2.0), Vec3f::new(0.0, 0.0, 1.0));
        let hit = bounds.intersect_test(&ray, 0.0, Float::INFINITY).unwrap();
        assert!((hit.0 - 1.5).abs() < 1e-4);
        assert!((hit.1 - 2.5).abs() < 1e-4);

        // miss
        let bounds = Bounds3::with_bounds(Point3f::new(1.0, 1.0, 1.0), Point3f::new(2.0, 2.0, 2.0));
        let ray = Ray::new(Point3f::new(0.0, 0.0, 0.0), Vec3f::new(-1.0, 1.0, 1.0).normalize());
        assert!(bounds.intersect_test(&ray, 0.0, Float::INFINITY).is_none());
    }

    #[test]
    fn bounding_sphere_encloses_corners() {
        let bounds = Bounds3::with_bounds(Point3f::new(-1.0, -2.0, -3.0), Point3f::new(4.0, 5.0, 6.0));
        let (center, radius) = bounds.bounding_sphere();
        assert!((bounds.min - center).magnitude() <= radius + 1e-4);
        assert!((bounds.max - center).magnitude() <= radius + 1e-4);
    }
}
