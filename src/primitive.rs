//! The aggregate's leaf type: a shape bound to a material and, optionally,
//! the area light it emits as. `Scene` holds every primitive behind a
//! `Primitive` trait object so the BVH and the mesh-face specialization
//! (one `GeometricPrimitive` synthesized per hit triangle) share one
//! traversal path.

use crate::geometry::bounds::Bounds3f;
use crate::geometry::Ray;
use crate::interaction::Interaction;
use crate::light::Light;
use crate::material::Material;
use crate::shapes::Shape;
use crate::{Float, Normal3, Point2f, Point3f};
use std::sync::Arc;

pub trait Primitive: Sync + Send {
    fn bounds(&self) -> Bounds3f;

    /// Finds the nearest hit in `(t_min, t_max]`, filling in the
    /// back-references `Shape::intersect` leaves unset.
    fn intersect<'p>(&'p self, ray: &Ray, t_min: Float, t_max: Float) -> Option<Interaction<'p>>;

    fn occlude(&self, ray: &Ray, t_min: Float, t_max: Float) -> Option<Float>;

    fn material(&self) -> Option<&dyn Material>;

    fn area_light(&self) -> Option<&dyn Light>;
}

/// A shape paired with a shared material and, for emissive primitives, the
/// area light sampling that same shape. `reverse_orientation` is carried
/// uniformly here rather than per-shape, so any `Shape` impl can be flipped
/// without its own code knowing about it.
pub struct GeometricPrimitive<S: Shape> {
    shape: Arc<S>,
    material: Option<Arc<dyn Material>>,
    area_light: Option<Arc<dyn Light>>,
    reverse_orientation: bool,
}

impl<S: Shape> GeometricPrimitive<S> {
    pub fn new(shape: Arc<S>, material: Option<Arc<dyn Material>>, reverse_orientation: bool) -> Self {
        Self { shape, material, area_light: None, reverse_orientation }
    }

    /// Attaches an area light that samples `self.shape`. The caller builds
    /// the light over the same `Arc<S>` clone so shape data is never
    /// duplicated between the primitive and the light.
    pub fn with_area_light(mut self, area_light: Arc<dyn Light>) -> Self {
        self.area_light = Some(area_light);
        self
    }

    pub fn shape(&self) -> &Arc<S> {
        &self.shape
    }
}

impl<S: Shape + Sync + Send> Primitive for GeometricPrimitive<S> {
    fn bounds(&self) -> Bounds3f {
        self.shape.bounds()
    }

    fn intersect<'p>(&'p self, ray: &Ray, t_min: Float, t_max: Float) -> Option<Interaction<'p>> {
        let mut isect: Interaction<'p> = self.shape.intersect(ray, t_min, t_max)?;
        if self.reverse_orientation {
            isect = isect.reverse_orientation();
        }
        isect.primitive = Some(self);
        isect.material = self.material.as_deref();
        isect.area_light = self.area_light.as_deref();
        Some(isect)
    }

    fn occlude(&self, ray: &Ray, t_min: Float, t_max: Float) -> Option<Float> {
        self.shape.occlude(ray, t_min, t_max)
    }

    fn material(&self) -> Option<&dyn Material> {
        self.material.as_deref()
    }

    fn area_light(&self) -> Option<&dyn Light> {
        self.area_light.as_deref()
    }
}

/// Exposed for lights that need to draw a point on the primitive's shape
/// without depending on the concrete `S`, e.g. when a light is constructed
/// before its owning primitive (see `light::diffuse`).
pub fn sample_shape_point<S: Shape>(shape: &S, u: Point2f) -> (Point3f, Normal3, Float) {
    shape.sample_point(u)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::matte::MatteMaterial;
    use crate::shapes::sphere::Sphere;
    use crate::spectrum::Rgb;
    use crate::texture::ConstantTexture;
    use crate::{Point3f, Vec3f};

    fn unit_ray(origin: Point3f, dir: Vec3f) -> Ray {
        use cgmath::InnerSpace;
        Ray::new(origin, dir.normalize())
    }

    #[test]
    fn geometric_primitive_fills_back_references() {
        let shape = Arc::new(Sphere::new(Point3f::new(0.0, 0.0, 0.0), 1.0));
        let material: Arc<dyn Material> = Arc::new(MatteMaterial::new(ConstantTexture(Rgb::new(0.8))));
        let prim = GeometricPrimitive::new(shape, Some(material), false);

        let ray = unit_ray(Point3f::new(0.0, 0.0, -5.0), Vec3f::new(0.0, 0.0, 1.0));
        let hit = prim.intersect(&ray, 1e-3, Float::INFINITY).expect("sphere hit");
        assert!(hit.primitive.is_some());
        assert!(hit.material.is_some());
        assert!(hit.area_light.is_none());
    }

    #[test]
    fn reverse_orientation_flips_normal() {
        let shape = Arc::new(Sphere::new(Point3f::new(0.0, 0.0, 0.0), 1.0));
        let plain = GeometricPrimitive::new(shape.clone(), None, false);
        let flipped = GeometricPrimitive::new(shape, None, true);

        let ray = unit_ray(Point3f::new(0.0, 0.0, -5.0), Vec3f::new(0.0, 0.0, 1.0));
        let a = plain.intersect(&ray, 1e-3, Float::INFINITY).unwrap();
        let b = flipped.intersect(&ray, 1e-3, Float::INFINITY).unwrap();
        assert_eq!(a.ng.0, -b.ng.0);
    }
}
