//! An isotropic point light: delta-positional, `radiance = intensity /
//! |p - x|^2`, `power = intensity * 4*pi`.

use crate::interaction::Interaction;
use crate::light::{Light, LightKind, LightSample};
use crate::spectrum::Rgb;
use crate::{Point2f, Point3f};
use cgmath::{InnerSpace, MetricSpace};
use std::f32::consts::PI;

pub struct PointLight {
    position: Point3f,
    intensity: Rgb,
}

impl PointLight {
    pub fn new(position: Point3f, intensity: Rgb) -> Self {
        Self { position, intensity }
    }
}

impl Light for PointLight {
    fn kind(&self) -> LightKind {
        LightKind::DeltaPoint
    }

    fn sample(&self, reference: &Interaction, _u: Point2f) -> LightSample {
        let d = self.position - reference.point;
        let dist2 = reference.point.distance2(self.position);
        LightSample {
            wi: d.normalize(),
            point_on_light: self.position,
            radiance: self.intensity / dist2,
            pdf: 1.0,
            kind: LightKind::DeltaPoint,
        }
    }

    fn power(&self) -> Rgb {
        self.intensity * (4.0 * PI)
    }
}
