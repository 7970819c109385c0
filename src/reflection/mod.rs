//! BSDF lobes (`BxDF`s) in the local shading frame.
//!
//! Every function here operates on directions already expressed in the
//! local frame whose `+z` axis is the shading normal (`cos_theta(w) = w.z`);
//! the frame transform itself lives in [`bsdf::Bsdf`].

use crate::fresnel::Fresnel;
use crate::sampling::cosine_sample_hemisphere;
use crate::spectrum::Rgb;
use crate::{Float, Normal3, Point2f, Vec3f};
use bitflags::bitflags;
use cgmath::InnerSpace;
use std::f32::consts::{FRAC_1_PI, PI};

pub mod bsdf;
pub mod microfacet;

use microfacet::GgxDistribution;

bitflags! {
    pub struct BxDFType: u8 {
        const REFLECTION = 1;
        const TRANSMISSION = 1 << 1;
        const DIFFUSE = 1 << 2;
        const GLOSSY = 1 << 3;
        const SPECULAR = 1 << 4;
    }
}

impl BxDFType {
    /// True only when the flags carry `SPECULAR` and neither `DIFFUSE` nor
    /// `GLOSSY` — a BSDF the direct-light estimator must never sample (spec
    /// §4.J step 8: "only if BSDF is not purely specular").
    pub fn is_specular(self) -> bool {
        self.contains(BxDFType::SPECULAR) && !self.intersects(BxDFType::DIFFUSE | BxDFType::GLOSSY)
    }
}

pub(crate) fn cos_theta(w: Vec3f) -> Float {
    w.z
}
pub(crate) fn abs_cos_theta(w: Vec3f) -> Float {
    w.z.abs()
}

/// Snell's-law refraction of `wi` about normal `n`, `eta = eta_i/eta_t`.
/// Returns `None` on total internal reflection.
pub fn refract(wi: Vec3f, n: Normal3, eta: Float) -> Option<Vec3f> {
    let cos_theta_i = n.dot(wi);
    let sin2_theta_i = Float::max(0.0, 1.0 - cos_theta_i * cos_theta_i);
    let sin2_theta_t = eta * eta * sin2_theta_i;
    if sin2_theta_t >= 1.0 {
        return None;
    }
    let cos_theta_t = Float::sqrt(1.0 - sin2_theta_t);
    Some(eta * -wi + (eta * cos_theta_i - cos_theta_t) * n.0)
}

pub fn reflect(wo: Vec3f, n: Vec3f) -> Vec3f {
    -wo + 2.0 * wo.dot(n) * n
}

pub fn same_hemisphere(v1: Vec3f, v2: Vec3f) -> bool {
    v1.z.is_sign_positive() == v2.z.is_sign_positive()
}

#[derive(Clone, Copy)]
pub struct ScatterSample {
    pub f: Rgb,
    pub wi: Vec3f,
    pub pdf: Float,
    pub sampled_type: BxDFType,
}

pub trait BxDF {
    fn get_type(&self) -> BxDFType;

    fn matches_flags(&self, t: BxDFType) -> bool {
        t.contains(self.get_type())
    }

    /// The scattering function's value for a pair of local-frame directions.
    fn f(&self, wo: Vec3f, wi: Vec3f) -> Rgb;

    /// Importance-samples an incident direction given outgoing `wo`.
    fn sample_f(&self, wo: Vec3f, u: Point2f) -> Option<ScatterSample>;

    fn pdf(&self, wo: Vec3f, wi: Vec3f) -> Float;
}

/// `f = albedo / pi`, cosine-weighted sampling aligned to `wo`'s hemisphere,
/// `pdf = |wi.z| / pi`. Spec §4.G Lambertian reflection.
pub struct LambertianReflection {
    pub albedo: Rgb,
}

impl LambertianReflection {
    pub fn new(albedo: Rgb) -> Self {
        Self { albedo }
    }
}

impl BxDF for LambertianReflection {
    fn get_type(&self) -> BxDFType {
        BxDFType::REFLECTION | BxDFType::DIFFUSE
    }

    fn f(&self, _wo: Vec3f, _wi: Vec3f) -> Rgb {
        self.albedo * FRAC_1_PI
    }

    fn sample_f(&self, wo: Vec3f, u: Point2f) -> Option<ScatterSample> {
        let mut wi = cosine_sample_hemisphere(u);
        if wo.z < 0.0 {
            wi.z *= -1.0;
        }
        let pdf = abs_cos_theta(wi) * FRAC_1_PI;
        Some(ScatterSample { f: self.f(wo, wi), wi, pdf, sampled_type: self.get_type() })
    }

    fn pdf(&self, wo: Vec3f, wi: Vec3f) -> Float {
        if same_hemisphere(wo, wi) {
            abs_cos_theta(wi) * FRAC_1_PI
        } else {
            0.0
        }
    }
}

/// A perfect mirror. `eval`/`pdf` are identically zero per spec §4.G — the
/// integrator must never attempt direct-light estimation against it.
pub struct SpecularReflection<F: Fresnel> {
    pub r: Rgb,
    pub fresnel: F,
}

impl<F: Fresnel> SpecularReflection<F> {
    pub fn new(r: Rgb, fresnel: F) -> Self {
        Self { r, fresnel }
    }
}

impl<F: Fresnel> BxDF for SpecularReflection<F> {
    fn get_type(&self) -> BxDFType {
        BxDFType::REFLECTION | BxDFType::SPECULAR
    }

    fn f(&self, _wo: Vec3f, _wi: Vec3f) -> Rgb {
        Rgb::BLACK
    }

    fn sample_f(&self, wo: Vec3f, _u: Point2f) -> Option<ScatterSample> {
        let wi = Vec3f::new(-wo.x, -wo.y, wo.z);
        let f = self.fresnel.evaluate(cos_theta(wi)) * self.r / abs_cos_theta(wi);
        Some(ScatterSample { f, wi, pdf: 1.0, sampled_type: self.get_type() })
    }

    fn pdf(&self, _wo: Vec3f, _wi: Vec3f) -> Float {
        0.0
    }
}

/// A dielectric interface: reflects with Schlick's Fresnel weight and
/// refracts otherwise, collapsing to a mirror under total internal
/// reflection. Spec §4.G specular transmission.
pub struct FresnelSpecular {
    pub r: Rgb,
    pub t: Rgb,
    pub eta_a: Float,
    pub eta_b: Float,
}

impl FresnelSpecular {
    pub fn new(r: Rgb, t: Rgb, eta_a: Float, eta_b: Float) -> Self {
        Self { r, t, eta_a, eta_b }
    }
}

impl BxDF for FresnelSpecular {
    fn get_type(&self) -> BxDFType {
        BxDFType::REFLECTION | BxDFType::TRANSMISSION | BxDFType::SPECULAR
    }

    fn f(&self, _wo: Vec3f, _wi: Vec3f) -> Rgb {
        Rgb::BLACK
    }

    fn sample_f(&self, wo: Vec3f, u: Point2f) -> Option<ScatterSample> {
        use crate::fresnel::fresnel_schlick_dielectric;

        let entering = cos_theta(wo) > 0.0;
        let (eta_i, eta_t) = if entering { (self.eta_a, self.eta_b) } else { (self.eta_b, self.eta_a) };
        let f_r = fresnel_schlick_dielectric(cos_theta(wo), eta_i, eta_t);

        if u.x < f_r {
            // reflect
            let wi = Vec3f::new(-wo.x, -wo.y, wo.z);
            let f = self.r * f_r / abs_cos_theta(wi);
            return Some(ScatterSample { f, wi, pdf: f_r, sampled_type: BxDFType::REFLECTION | BxDFType::SPECULAR });
        }

        let n = Normal3::new(0.0, 0.0, 1.0);
        let n = if cos_theta(wo) < 0.0 { -n } else { n };
        let wi = refract(wo, n, eta_i / eta_t)?;
        let ft = self.t * (1.0 - f_r);
        Some(ScatterSample {
            f: ft / abs_cos_theta(wi),
            wi,
            pdf: 1.0 - f_r,
            sampled_type: BxDFType::TRANSMISSION | BxDFType::SPECULAR,
        })
    }

    fn pdf(&self, _wo: Vec3f, _wi: Vec3f) -> Float {
        0.0
    }
}

/// Cook-Torrance microfacet reflection with an isotropic GGX normal
/// distribution and the Smith masking-shadowing term. Spec §4.G.
pub struct MicrofacetReflection<F: Fresnel> {
    pub r: Rgb,
    pub distribution: GgxDistribution,
    pub fresnel: F,
}

impl<F: Fresnel> MicrofacetReflection<F> {
    pub fn new(r: Rgb, distribution: GgxDistribution, fresnel: F) -> Self {
        Self { r, distribution, fresnel }
    }
}

impl<F: Fresnel> BxDF for MicrofacetReflection<F> {
    fn get_type(&self) -> BxDFType {
        BxDFType::REFLECTION | BxDFType::GLOSSY
    }

    fn f(&self, wo: Vec3f, wi: Vec3f) -> Rgb {
        let cos_theta_o = abs_cos_theta(wo);
        let cos_theta_i = abs_cos_theta(wi);
        let wh = wi + wo;
        if cos_theta_i == 0.0 || cos_theta_o == 0.0 || wh == Vec3f::new(0.0, 0.0, 0.0) {
            return Rgb::BLACK;
        }
        let wh = wh.normalize();
        let f = self.fresnel.evaluate(wi.dot(wh));
        self.r * self.distribution.d(wh) * self.distribution.g(wo, wi) * f / (4.0 * cos_theta_i * cos_theta_o)
    }

    fn sample_f(&self, wo: Vec3f, u: Point2f) -> Option<ScatterSample> {
        if wo.z == 0.0 {
            return None;
        }
        let wh = self.distribution.sample_wh(wo, u);
        let wi = reflect(wo, wh);
        if !same_hemisphere(wo, wi) {
            return None;
        }
        let pdf = self.distribution.pdf(wh) / (4.0 * wo.dot(wh));
        Some(ScatterSample { f: self.f(wo, wi), wi, pdf, sampled_type: self.get_type() })
    }

    fn pdf(&self, wo: Vec3f, wi: Vec3f) -> Float {
        if !same_hemisphere(wo, wi) {
            return 0.0;
        }
        let wh = (wo + wi).normalize();
        self.distribution.pdf(wh) / (4.0 * wo.dot(wh))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Rng;
    use approx::assert_relative_eq;

    #[test]
    fn lambertian_energy_conservation() {
        let bxdf = LambertianReflection::new(Rgb::new(0.9));
        let wo = Vec3f::new(0.0, 0.0, 1.0);
        let mut rng = Rng::new(5);
        let n = 20_000;
        let mut sum = Rgb::BLACK;
        for _ in 0..n {
            let sample = bxdf.sample_f(wo, rng.uniform_2d()).unwrap();
            sum += sample.f * abs_cos_theta(sample.wi) / sample.pdf;
        }
        let estimate = sum / n as Float;
        assert!(estimate.max_component() <= 1.0 + 1e-3);
        assert_relative_eq!(estimate.r(), 0.9, epsilon = 5e-2);
    }

    #[test]
    fn specular_reflection_mirrors_about_normal() {
        let bxdf = SpecularReflection::new(Rgb::new(1.0), crate::fresnel::FresnelDielectric::new(1.0, 1.5));
        let wo = Vec3f::new(0.3, 0.1, 0.9).normalize();
        let sample = bxdf.sample_f(wo, Point2f::new(0.0, 0.0)).unwrap();
        assert_relative_eq!(sample.wi.x, -wo.x, epsilon = 1e-6);
        assert_relative_eq!(sample.wi.y, -wo.y, epsilon = 1e-6);
        assert_relative_eq!(sample.wi.z, wo.z, epsilon = 1e-6);
        assert_eq!(bxdf.pdf(wo, sample.wi), 0.0);
        assert!(bxdf.f(wo, sample.wi).is_black());
    }
}
