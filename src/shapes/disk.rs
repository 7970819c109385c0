use std::f32::consts::PI;

use crate::geometry::bounds::Bounds3f;
use crate::geometry::Ray;
use crate::interaction::Interaction;
use crate::sampling::uniform_sample_disk;
use crate::shapes::Shape;
use crate::{Float, Normal3, Point2f, Point3f};

/// A disk of `radius` lying in the xy plane at `height`, facing `+z`.
pub struct Disk {
    pub height: Float,
    pub radius: Float,
}

impl Disk {
    pub fn new(height: Float, radius: Float) -> Self {
        Self { height, radius }
    }

    fn hit_t(&self, ray: &Ray, t_min: Float, t_max: Float) -> Option<(Float, Point3f)> {
        if ray.dir.z == 0.0 {
            return None;
        }
        let t = (self.height - ray.origin.z) / ray.dir.z;
        if t <= t_min || t > t_max {
            return None;
        }
        let p = ray.at(t);
        let dist2 = p.x * p.x + p.y * p.y;
        if dist2 > self.radius * self.radius {
            return None;
        }
        Some((t, p))
    }
}

impl Shape for Disk {
    fn area(&self) -> Float {
        PI * self.radius * self.radius
    }

    fn bounds(&self) -> Bounds3f {
        Bounds3f::with_bounds(
            Point3f::new(-self.radius, -self.radius, self.height),
            Point3f::new(self.radius, self.radius, self.height),
        )
    }

    fn intersect(&self, ray: &Ray, t_min: Float, t_max: Float) -> Option<Interaction<'static>> {
        let (t, p) = self.hit_t(ray, t_min, t_max)?;
        let dist = (p.x * p.x + p.y * p.y).sqrt();
        let mut phi = p.y.atan2(p.x);
        if phi < 0.0 {
            phi += 2.0 * PI;
        }
        let uv = Point2f::new(phi / (2.0 * PI), 1.0 - dist / self.radius);
        let n = Normal3::new(0.0, 0.0, 1.0);
        Some(Interaction::new(t, p, n, n, uv))
    }

    fn occlude(&self, ray: &Ray, t_min: Float, t_max: Float) -> Option<Float> {
        self.hit_t(ray, t_min, t_max).map(|(t, _)| t)
    }

    fn sample_point(&self, u: Point2f) -> (Point3f, Normal3, Float) {
        let (x, y) = uniform_sample_disk(u);
        let p = Point3f::new(x * self.radius, y * self.radius, self.height);
        // pdf as given by the disk sampling contract, in terms of radius
        // rather than area.
        let pdf = 1.0 / (2.0 * PI * self.radius);
        (p, Normal3::new(0.0, 0.0, 1.0), pdf)
    }
}
