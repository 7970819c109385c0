//! Pinhole perspective camera: builds an orthonormal basis from a look
//! direction and up hint, then maps a film-space sample directly to a
//! world-space ray without a separate screen/raster matrix stack (the
//! matrices in spec §6 exist for the outer loop's world-to-raster
//! bookkeeping, which is out of scope here; the per-ray math they encode is
//! reproduced directly below).

use crate::geometry::Ray;
use crate::{Float, Point2f, Point3f, Vec3f};
use cgmath::InnerSpace;

/// The scene-external camera description: world position, look direction
/// (not a look-at point — see `DESIGN.md`), up hint, vertical field of view
/// in radians, and the film's width/height ratio.
#[derive(Clone, Copy)]
pub struct CameraSetting {
    pub position: Point3f,
    pub lookat: Vec3f,
    pub lookup: Vec3f,
    pub fov_y: Float,
    pub aspect: Float,
}

pub struct PerspectiveCamera {
    position: Point3f,
    right: Vec3f,
    up: Vec3f,
    forward: Vec3f,
    tan_half_fov_y: Float,
    aspect: Float,
}

impl PerspectiveCamera {
    /// `right = normalize(forward x lookup)`, `up = right x forward`, per
    /// spec §6's camera basis.
    pub fn new(setting: CameraSetting) -> Self {
        let forward = setting.lookat.normalize();
        let right = forward.cross(setting.lookup).normalize();
        let up = right.cross(forward);
        Self {
            position: setting.position,
            right,
            up,
            forward,
            tan_half_fov_y: (setting.fov_y * 0.5).tan(),
            aspect: setting.aspect,
        }
    }

    /// `film_uv` in `[0, 1]^2` with `(0, 0)` at the top-left of the frame.
    /// Folds the perspective-projection/raster-transform pair from spec §6
    /// (`kx`/`ky` frustum half-widths, y-flip, NDC-to-raster scale) into one
    /// direction computation, since no intermediate raster matrix is needed
    /// by anything inside the core.
    pub fn generate_ray(&self, film_uv: Point2f) -> Ray {
        let half_h = self.tan_half_fov_y;
        let half_w = half_h * self.aspect;
        let cx = (2.0 * film_uv.x - 1.0) * half_w;
        let cy = (1.0 - 2.0 * film_uv.y) * half_h;
        let dir = (self.right * cx + self.up * cy + self.forward).normalize();
        Ray::new(self.position, dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    fn setting() -> CameraSetting {
        CameraSetting {
            position: Point3f::new(0.0, 0.0, -5.0),
            lookat: Vec3f::new(0.0, 0.0, 1.0),
            lookup: Vec3f::new(0.0, 1.0, 0.0),
            fov_y: FRAC_PI_2,
            aspect: 1.0,
        }
    }

    #[test]
    fn center_of_film_looks_straight_down_lookat() {
        let camera = PerspectiveCamera::new(setting());
        let ray = camera.generate_ray(Point2f::new(0.5, 0.5));
        assert_relative_eq!(ray.dir.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(ray.dir.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(ray.dir.z, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn top_left_corner_points_up_and_left() {
        let camera = PerspectiveCamera::new(setting());
        let ray = camera.generate_ray(Point2f::new(0.0, 0.0));
        assert!(ray.dir.x < 0.0);
        assert!(ray.dir.y > 0.0);
    }

    #[test]
    fn rays_originate_at_the_camera_position() {
        let camera = PerspectiveCamera::new(setting());
        let ray = camera.generate_ray(Point2f::new(0.3, 0.7));
        assert_eq!(ray.origin, setting().position);
    }
}
