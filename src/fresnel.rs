//! Schlick's polynomial approximation to the Fresnel reflectance, used by
//! both specular transmission (§4.G dielectric) and microfacet reflection
//! (§4.G conductor/metal) rather than the exact dielectric/conductor Fresnel
//! equations.

use crate::spectrum::Rgb;
use crate::Float;

/// `(1 - cos_theta)^5`, clamped so a slightly negative cosine from floating
/// point error doesn't produce a complex result.
fn schlick_weight(cos_theta: Float) -> Float {
    let m = (1.0 - cos_theta).clamp(0.0, 1.0);
    let m2 = m * m;
    m2 * m2 * m
}

/// `R0 = ((eta_i - eta_t)/(eta_i + eta_t))^2`, the normal-incidence
/// reflectance for a dielectric interface.
pub fn schlick_r0_from_eta(eta_i: Float, eta_t: Float) -> Float {
    let r0 = (eta_i - eta_t) / (eta_i + eta_t);
    r0 * r0
}

/// `R(theta) = R0 + (1 - R0)(1 - cos_theta)^5`.
pub fn fresnel_schlick_dielectric(cos_theta: Float, eta_i: Float, eta_t: Float) -> Float {
    let r0 = schlick_r0_from_eta(eta_i, eta_t);
    r0 + (1.0 - r0) * schlick_weight(cos_theta.abs())
}

/// Same polynomial, generalized to a tinted normal-incidence reflectance
/// `r0` for metals, where reflectance varies per channel.
pub fn fresnel_schlick_conductor(cos_theta: Float, r0: Rgb) -> Rgb {
    r0 + (Rgb::new(1.0) - r0) * schlick_weight(cos_theta.abs())
}

pub trait Fresnel {
    /// Given the cosine of the angle between the incident direction and the
    /// surface normal, the fraction of light reflected.
    fn evaluate(&self, cos_i: Float) -> Rgb;
}

/// Fresnel reflectance of a dielectric (glass, water) interface.
pub struct FresnelDielectric {
    pub eta_i: Float,
    pub eta_t: Float,
}

impl FresnelDielectric {
    pub fn new(eta_i: Float, eta_t: Float) -> Self {
        Self { eta_i, eta_t }
    }
}

impl Fresnel for FresnelDielectric {
    fn evaluate(&self, cos_i: Float) -> Rgb {
        Rgb::new(fresnel_schlick_dielectric(cos_i, self.eta_i, self.eta_t))
    }
}

/// Fresnel reflectance of a conductor (metal), specified directly by its
/// normal-incidence reflectance rather than complex indices of refraction.
pub struct FresnelConductor {
    pub r0: Rgb,
}

impl FresnelConductor {
    pub fn new(r0: Rgb) -> Self {
        Self { r0 }
    }
}

impl Fresnel for FresnelConductor {
    fn evaluate(&self, cos_i: Float) -> Rgb {
        fresnel_schlick_conductor(cos_i, self.r0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn normal_incidence_matches_r0() {
        let f = FresnelDielectric::new(1.0, 1.5);
        assert_relative_eq!(f.evaluate(1.0).r(), schlick_r0_from_eta(1.0, 1.5), epsilon = 1e-6);
    }

    #[test]
    fn grazing_incidence_approaches_total_reflection() {
        let f = FresnelDielectric::new(1.0, 1.5);
        assert_relative_eq!(f.evaluate(0.001).r(), 1.0, epsilon = 1e-2);
    }

    #[test]
    fn conductor_reflectance_tints_toward_r0() {
        let r0 = Rgb::rgb(0.9, 0.7, 0.2);
        let f = FresnelConductor::new(r0);
        let at_normal = f.evaluate(1.0);
        assert_relative_eq!(at_normal.r(), r0.r(), epsilon = 1e-6);
        assert_relative_eq!(at_normal.g(), r0.g(), epsilon = 1e-6);
    }
}
