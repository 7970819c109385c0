use crate::geometry::bounds::Bounds3f;
use crate::geometry::Ray;
use crate::interaction::Interaction;
use crate::shapes::Shape;
use crate::{Float, Normal3, Point2f, Point3f};

/// An axis-aligned rectangle lying in the `z = height` plane, spanning
/// `[x0, x1] x [y0, y1]`, facing `+z`.
pub struct Rectangle {
    pub height: Float,
    pub x0: Float,
    pub x1: Float,
    pub y0: Float,
    pub y1: Float,
}

impl Rectangle {
    pub fn new(height: Float, x0: Float, x1: Float, y0: Float, y1: Float) -> Self {
        Self { height, x0, x1, y0, y1 }
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
        if p.x < self.x0 || p.x > self.x1 || p.y < self.y0 || p.y > self.y1 {
            return None;
        }
        Some((t, p))
    }

    fn width(&self) -> Float {
        self.x1 - self.x0
    }

    fn height_extent(&self) -> Float {
        self.y1 - self.y0
    }
}

impl Shape for Rectangle {
    fn area(&self) -> Float {
        self.width() * self.height_extent()
    }

    fn bounds(&self) -> Bounds3f {
        Bounds3f::with_bounds(
            Point3f::new(self.x0, self.y0, self.height),
            Point3f::new(self.x1, self.y1, self.height),
        )
    }

    fn intersect(&self, ray: &Ray, t_min: Float, t_max: Float) -> Option<Interaction<'static>> {
        let (t, p) = self.hit_t(ray, t_min, t_max)?;
        let uv = Point2f::new((p.x - self.x0) / self.width(), (p.y - self.y0) / self.height_extent());
        let n = Normal3::new(0.0, 0.0, 1.0);
        Some(Interaction::new(t, p, n, n, uv))
    }

    fn occlude(&self, ray: &Ray, t_min: Float, t_max: Float) -> Option<Float> {
        self.hit_t(ray, t_min, t_max).map(|(t, _)| t)
    }

    fn sample_point(&self, u: Point2f) -> (Point3f, Normal3, Float) {
        let p = Point3f::new(self.x0 + u.x * self.width(), self.y0 + u.y * self.height_extent(), self.height);
        (p, Normal3::new(0.0, 0.0, 1.0), 1.0 / self.area())
    }
}
