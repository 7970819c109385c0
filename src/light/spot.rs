//! A point light restricted to a cone: identical falloff to `PointLight`,
//! zeroed outside the cone half-angle. Supplemental to the distilled
//! light catalog (see `DESIGN.md`) but a direct generalization of it.

use crate::interaction::Interaction;
use crate::light::{Light, LightKind, LightSample};
use crate::spectrum::Rgb;
use crate::{Point2f, Point3f, Vec3f};
use cgmath::{InnerSpace, MetricSpace};
use std::f32::consts::PI;

pub struct SpotLight {
    position: Point3f,
    /// Unit vector the cone points along.
    direction: Vec3f,
    cos_total_width: crate::Float,
    intensity: Rgb,
}

impl SpotLight {
    pub fn new(position: Point3f, direction: Vec3f, cone_half_angle: crate::Float, intensity: Rgb) -> Self {
        Self { position, direction: direction.normalize(), cos_total_width: cone_half_angle.cos(), intensity }
    }

    fn falloff(&self, w: Vec3f) -> crate::Float {
        if w.dot(self.direction) >= self.cos_total_width {
            1.0
        } else {
            0.0
        }
    }
}

impl Light for SpotLight {
    fn kind(&self) -> LightKind {
        LightKind::DeltaPoint
    }

    fn sample(&self, reference: &Interaction, _u: Point2f) -> LightSample {
        let d = self.position - reference.point;
        let dist2 = reference.point.distance2(self.position);
        let wi = d.normalize();
        let radiance = self.intensity * self.falloff(-wi) / dist2;
        LightSample { wi, point_on_light: self.position, radiance, pdf: 1.0, kind: LightKind::DeltaPoint }
    }

    fn power(&self) -> Rgb {
        self.intensity * (2.0 * PI * (1.0 - self.cos_total_width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Normal3;

    #[test]
    fn radiance_is_zero_outside_cone() {
        let light = SpotLight::new(Point3f::new(0.0, 0.0, 1.0), Vec3f::new(0.0, 0.0, -1.0), 0.2, Rgb::new(1.0));
        let n = Normal3::new(0.0, 0.0, 1.0);
        // Far off-axis point: light points straight down, this sample is to the side.
        let off_axis = Interaction::new(0.0, Point3f::new(5.0, 0.0, 0.0), n, n, Point2f::new(0.0, 0.0));
        let sample = light.sample(&off_axis, Point2f::new(0.0, 0.0));
        assert_eq!(sample.radiance, Rgb::BLACK);
    }

    #[test]
    fn radiance_is_nonzero_on_axis() {
        let light = SpotLight::new(Point3f::new(0.0, 0.0, 1.0), Vec3f::new(0.0, 0.0, -1.0), 0.5, Rgb::new(1.0));
        let n = Normal3::new(0.0, 0.0, 1.0);
        let on_axis = Interaction::new(0.0, Point3f::new(0.0, 0.0, 0.0), n, n, Point2f::new(0.0, 0.0));
        let sample = light.sample(&on_axis, Point2f::new(0.0, 0.0));
        assert!(sample.radiance.r() > 0.0);
    }
}
