//! Isotropic GGX (Trowbridge-Reitz) normal distribution with the Smith
//! masking-shadowing term, per spec §4.G:
//!
//! - `alpha = roughness^2`
//! - `D(wh) = (alpha / (cos^2(theta_h) (alpha^2-1) + 1))^2 / pi`
//! - `g1(v) = 2 / (1 + sqrt(1 + alpha^2 tan^2(theta_v)))`, `G = g1(wo) * g1(wi)`

use crate::reflection::{abs_cos_theta, same_hemisphere};
use crate::{Float, Point2f, Vec3f};
use std::f32::consts::PI;

pub struct GgxDistribution {
    alpha: Float,
}

impl GgxDistribution {
    pub fn new(alpha: Float) -> Self {
        Self { alpha }
    }

    pub fn from_roughness(roughness: Float) -> Self {
        Self::new(roughness * roughness)
    }

    pub fn d(&self, wh: Vec3f) -> Float {
        let cos2_theta_h = wh.z * wh.z;
        let a2 = self.alpha * self.alpha;
        let denom = cos2_theta_h * (a2 - 1.0) + 1.0;
        let x = self.alpha / denom;
        x * x / PI
    }

    fn g1(&self, v: Vec3f) -> Float {
        let cos2_theta_v = v.z * v.z;
        let tan2_theta_v = Float::max(0.0, 1.0 - cos2_theta_v) / cos2_theta_v;
        if tan2_theta_v.is_infinite() {
            return 0.0;
        }
        2.0 / (1.0 + Float::sqrt(1.0 + self.alpha * self.alpha * tan2_theta_v))
    }

    pub fn g(&self, wo: Vec3f, wi: Vec3f) -> Float {
        self.g1(wo) * self.g1(wi)
    }

    /// Samples a microfacet normal from the (non-visible-area) GGX
    /// distribution, via the standard polar inversion.
    pub fn sample_wh(&self, wo: Vec3f, u: Point2f) -> Vec3f {
        let tan2_theta = self.alpha * self.alpha * u.x / (1.0 - u.x);
        let cos_theta = 1.0 / Float::sqrt(1.0 + tan2_theta);
        let sin_theta = Float::sqrt(Float::max(0.0, 1.0 - cos_theta * cos_theta));
        let phi = 2.0 * PI * u.y;
        let wh = Vec3f::new(sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta);
        if same_hemisphere(wo, wh) {
            wh
        } else {
            -wh
        }
    }

    pub fn pdf(&self, wh: Vec3f) -> Float {
        self.d(wh) * abs_cos_theta(wh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Rng;
    use approx::assert_relative_eq;

    #[test]
    fn d_integrates_to_one_over_hemisphere() {
        // Monte-Carlo check that int D(wh)*cos(theta_h) dwh == 1, sampling
        // wh uniformly over the hemisphere.
        let dist = GgxDistribution::from_roughness(0.4);
        let mut rng = Rng::new(9);
        let n = 200_000;
        let mut sum = 0.0;
        for _ in 0..n {
            let wh = crate::sampling::uniform_sample_hemisphere(rng.uniform_2d());
            sum += dist.d(wh) * wh.z.abs() / crate::sampling::uniform_hemisphere_pdf();
        }
        assert_relative_eq!(sum / n as Float, 1.0, epsilon = 5e-2);
    }

    #[test]
    fn g1_is_one_at_normal_incidence() {
        let dist = GgxDistribution::from_roughness(0.5);
        assert_relative_eq!(dist.g1(Vec3f::new(0.0, 0.0, 1.0)), 1.0, epsilon = 1e-4);
    }

    #[test]
    fn sampled_normal_stays_in_wo_hemisphere() {
        let dist = GgxDistribution::from_roughness(0.6);
        let wo = Vec3f::new(0.3, -0.2, 0.9);
        let mut rng = Rng::new(4);
        for _ in 0..1000 {
            let wh = dist.sample_wh(wo, rng.uniform_2d());
            assert!(same_hemisphere(wo, wh));
        }
    }
}
