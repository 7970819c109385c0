use crate::{Float, Vec3f};
use cgmath::InnerSpace;

pub const INFINITY: Float = std::f32::INFINITY;

pub fn lerp(t: Float, v1: Float, v2: Float) -> Float {
    (1.0 - t) * v1 + t * v2
}

/// Solves `a*t^2 + b*t + c = 0` for real roots, returning them ordered
/// `t0 <= t1`. The discriminant is computed in `f64` to avoid catastrophic
/// cancellation for near-tangent rays.
pub fn quadratic(a: Float, b: Float, c: Float) -> Option<(Float, Float)> {
    let discrim = b as f64 * b as f64 - 4.0 * a as f64 * c as f64;
    if discrim < 0.0 {
        return None;
    }
    let root_discrim = discrim.sqrt();

    let q = if (b as f64) < 0.0 {
        -0.5 * (b as f64 - root_discrim)
    } else {
        -0.5 * (b as f64 + root_discrim)
    };

    let t0 = (q / a as f64) as Float;
    let t1 = (c as f64 / q) as Float;

    if t0 > t1 { Some((t1, t0)) } else { Some((t0, t1)) }
}

/// Builds an orthonormal basis `(tangent, bitangent)` for the plane
/// perpendicular to unit vector `n`, per the shading-frame construction used
/// throughout the BSDF layer: if `n.x != 0 || n.y != 0`, the tangent is
/// `(n.y, -n.x, 0)` normalized; otherwise the canonical x-axis is used.
pub fn coordinate_system(n: Vec3f) -> (Vec3f, Vec3f) {
    let tangent = if n.x != 0.0 || n.y != 0.0 {
        Vec3f::new(n.y, -n.x, 0.0).normalize()
    } else {
        Vec3f::new(1.0, 0.0, 0.0)
    };
    let bitangent = n.cross(tangent);
    (tangent, bitangent)
}

/// Reconstructs a direction from spherical coordinates expressed in an
/// arbitrary local frame `(sin_theta, cos_theta, phi)`.
pub fn spherical_direction(sin_theta: Float, cos_theta: Float, phi: Float) -> Vec3f {
    Vec3f::new(sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta)
}

pub fn faceforward(n: Vec3f, v: Vec3f) -> Vec3f {
    if n.dot(v) < 0.0 { -n } else { n }
}
