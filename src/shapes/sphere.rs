use std::f32::consts::PI;

use cgmath::{EuclideanSpace, InnerSpace};

use crate::geometry::bounds::Bounds3f;
use crate::geometry::Ray;
use crate::interaction::Interaction;
use crate::math::quadratic;
use crate::sampling::uniform_sample_sphere;
use crate::shapes::Shape;
use crate::{Float, Normal3, Point2f, Point3f};

pub struct Sphere {
    pub center: Point3f,
    pub radius: Float,
}

impl Sphere {
    pub fn new(center: Point3f, radius: Float) -> Self {
        Self { center, radius }
    }

    fn uv_at(&self, n: Normal3) -> Point2f {
        let mut u = 1.0 - n.0.y.atan2(n.0.x) / (2.0 * PI);
        if u < 0.0 {
            u += 1.0;
        }
        let v = 1.0 - n.0.z.clamp(-1.0, 1.0).acos() / PI;
        Point2f::new(u, v)
    }

    /// Returns the smallest root of `|o + t*d - c|^2 = r^2` inside `(t_min, t_max]`.
    fn hit_t(&self, ray: &Ray, t_min: Float, t_max: Float) -> Option<Float> {
        let oc = ray.origin - self.center;
        let a = ray.dir.dot(ray.dir);
        let b = 2.0 * oc.dot(ray.dir);
        let c = oc.dot(oc) - self.radius * self.radius;
        let (t0, t1) = quadratic(a, b, c)?;

        if t0 > t_max || t1 <= t_min {
            return None;
        }
        let t = if t0 > t_min { t0 } else { t1 };
        if t > t_max {
            return None;
        }
        Some(t)
    }
}

impl Shape for Sphere {
    fn area(&self) -> Float {
        4.0 * PI * self.radius * self.radius
    }

    fn bounds(&self) -> Bounds3f {
        let r = Point3f::new(self.radius, self.radius, self.radius);
        Bounds3f::with_bounds(self.center - r.to_vec(), self.center + r.to_vec())
    }

    fn intersect(&self, ray: &Ray, t_min: Float, t_max: Float) -> Option<Interaction<'static>> {
        let t = self.hit_t(ray, t_min, t_max)?;
        let point = ray.at(t);
        let n = Normal3((point - self.center).normalize());
        let uv = self.uv_at(n);
        Some(Interaction::new(t, point, n, n, uv))
    }

    fn occlude(&self, ray: &Ray, t_min: Float, t_max: Float) -> Option<Float> {
        self.hit_t(ray, t_min, t_max)
    }

    fn sample_point(&self, u: Point2f) -> (Point3f, Normal3, Float) {
        let n = Normal3(uniform_sample_sphere(u));
        let point = self.center + n.0 * self.radius;
        (point, n, 1.0 / self.area())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Rng;
    use approx::assert_relative_eq;

    #[test]
    fn ray_through_center_hits_near_and_far() {
        let sphere = Sphere::new(Point3f::new(0.0, 0.0, 0.0), 1.0);
        let ray = Ray::new(Point3f::new(0.0, 0.0, -5.0), cgmath::Vector3::new(0.0, 0.0, 1.0));
        let it = sphere.intersect(&ray, 0.0, Float::INFINITY).unwrap();
        assert_relative_eq!(it.t, 4.0, epsilon = 1e-4);
        assert_relative_eq!(it.ng.0.z, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn miss_returns_none() {
        let sphere = Sphere::new(Point3f::new(0.0, 0.0, 0.0), 1.0);
        let ray = Ray::new(Point3f::new(5.0, 5.0, -5.0), cgmath::Vector3::new(0.0, 0.0, 1.0));
        assert!(sphere.intersect(&ray, 0.0, Float::INFINITY).is_none());
    }

    #[test]
    fn hit_point_matches_ray_equation() {
        let sphere = Sphere::new(Point3f::new(1.0, 2.0, 3.0), 2.5);
        let ray = Ray::new(Point3f::new(1.0, 2.0, -10.0), cgmath::Vector3::new(0.0, 0.0, 1.0));
        let it = sphere.intersect(&ray, 0.0, Float::INFINITY).unwrap();
        let expected = ray.at(it.t);
        assert_relative_eq!(it.point.x, expected.x, epsilon = 1e-4);
        assert_relative_eq!(it.point.y, expected.y, epsilon = 1e-4);
        assert_relative_eq!(it.point.z, expected.z, epsilon = 1e-4);
        assert_relative_eq!(it.ng.0.magnitude(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn area_sampling_converges_to_surface_area() {
        let sphere = Sphere::new(Point3f::new(0.0, 0.0, 0.0), 2.0);
        let mut rng = Rng::new(3);
        let n = 100_000;
        let mut sum = 0.0;
        for _ in 0..n {
            let (_, _, pdf) = sphere.sample_point(rng.uniform_2d());
            sum += 1.0 / pdf;
        }
        assert_relative_eq!(sum / n as Float, sphere.area(), epsilon = 1.0);
    }
}
