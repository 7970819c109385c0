//! An area light that emits uniformly from one side of its shape.
//! Constructed over the same `Arc<S>` the owning primitive holds, so no
//! shape data is duplicated (see `primitive::GeometricPrimitive`).

use crate::interaction::Interaction;
use crate::light::{Light, LightKind, LightSample};
use crate::shapes::Shape;
use crate::spectrum::Rgb;
use crate::{Float, Normal3, Point2f, Vec3f};
use cgmath::InnerSpace;
use std::f32::consts::PI;
use std::sync::Arc;

pub struct DiffuseAreaLight<S: Shape> {
    shape: Arc<S>,
    intensity: Rgb,
    /// Emit from both faces rather than only the side the shape's
    /// outward normal points toward.
    two_sided: bool,
}

impl<S: Shape> DiffuseAreaLight<S> {
    pub fn new(shape: Arc<S>, intensity: Rgb, two_sided: bool) -> Self {
        Self { shape, intensity, two_sided }
    }

    fn faces(&self, n: Normal3, to_reference: Vec3f) -> bool {
        self.two_sided || n.dot(to_reference) > 0.0
    }
}

impl<S: Shape + Sync + Send> Light for DiffuseAreaLight<S> {
    fn kind(&self) -> LightKind {
        LightKind::Area
    }

    fn sample(&self, reference: &Interaction, u: Point2f) -> LightSample {
        let (point, normal, pdf) = self.shape.sample_point(u);
        let wi = (point - reference.point).normalize();
        let radiance = if self.faces(normal, -wi) { self.intensity } else { Rgb::BLACK };
        LightSample { wi, point_on_light: point, radiance, pdf, kind: LightKind::Area }
    }

    fn l_emitted(&self, ng: Normal3, w: Vec3f) -> Rgb {
        if self.faces(ng, w) {
            self.intensity
        } else {
            Rgb::BLACK
        }
    }

    fn power(&self) -> Rgb {
        let scale = if self.two_sided { 2.0 } else { 1.0 };
        self.intensity * (PI * self.shape.area() * scale)
    }
}
