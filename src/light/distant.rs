//! A directional (sun-like) light: constant incident direction, no
//! falloff. `power` needs the scene's bounding radius to convert an
//! irradiance into a total emitted power, supplied at construction rather
//! than discovered by a separate preprocessing pass.

use crate::interaction::Interaction;
use crate::light::{Light, LightKind, LightSample};
use crate::spectrum::Rgb;
use crate::{Float, Point2f, Vec3f};
use cgmath::InnerSpace;
use std::f32::consts::PI;

pub struct DistantLight {
    /// Direction the light travels (from the light toward the scene).
    direction: Vec3f,
    radiance: Rgb,
    world_radius: Float,
}

impl DistantLight {
    pub fn new(direction: Vec3f, radiance: Rgb, world_radius: Float) -> Self {
        Self { direction: direction.normalize(), radiance, world_radius }
    }
}

impl Light for DistantLight {
    fn kind(&self) -> LightKind {
        LightKind::DeltaDirection
    }

    fn sample(&self, reference: &Interaction, _u: Point2f) -> LightSample {
        let wi = -self.direction;
        let point_on_light = reference.point + wi * (2.0 * self.world_radius);
        LightSample { wi, point_on_light, radiance: self.radiance, pdf: 1.0, kind: LightKind::DeltaDirection }
    }

    fn power(&self) -> Rgb {
        self.radiance * (PI * self.world_radius * self.world_radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Normal3, Point2f, Point3f};

    #[test]
    fn sample_direction_is_opposite_travel_direction() {
        let light = DistantLight::new(Vec3f::new(0.0, 0.0, -1.0), Rgb::new(1.0), 10.0);
        let n = Normal3::new(0.0, 0.0, 1.0);
        let ia = Interaction::new(0.0, Point3f::new(0.0, 0.0, 0.0), n, n, Point2f::new(0.0, 0.0));
        let sample = light.sample(&ia, Point2f::new(0.0, 0.0));
        assert_eq!(sample.wi, Vec3f::new(0.0, 0.0, 1.0));
        assert_eq!(sample.pdf, 1.0);
    }
}
