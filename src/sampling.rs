use crate::{Float, Point2f, Vec3f};
use std::f32::consts::PI;

pub fn uniform_sample_hemisphere(u: Point2f) -> Vec3f {
    let z = u.x;
    let r = Float::sqrt(Float::max(0.0, 1.0 - z * z));
    let phi = 2.0 * PI * u.y;
    Vec3f::new(r * phi.cos(), r * phi.sin(), z)
}

pub fn uniform_hemisphere_pdf() -> Float {
    1.0 / (2.0 * PI)
}

pub fn uniform_sample_sphere(u: Point2f) -> Vec3f {
    let z = 1.0 - 2.0 * u.x;
    let r = Float::sqrt(Float::max(0.0, 1.0 - z * z));
    let phi = 2.0 * PI * u.y;
    Vec3f::new(r * phi.cos(), r * phi.sin(), z)
}

pub fn uniform_sphere_pdf() -> Float {
    1.0 / (4.0 * PI)
}

pub fn uniform_sample_disk(u: Point2f) -> (Float, Float) {
    let r = Float::sqrt(u.x);
    let phi = 2.0 * PI * u.y;
    (r * phi.cos(), r * phi.sin())
}

pub fn uniform_disk_pdf() -> Float {
    1.0 / PI
}

/// Cosine-weighted hemisphere sample via the direct polar parametrization
/// (not the Shirley concentric-disk mapping): `theta = 2*pi*u0`, `r = sqrt(u1)`.
pub fn cosine_sample_hemisphere(u: Point2f) -> Vec3f {
    let theta = 2.0 * PI * u.x;
    let r = Float::sqrt(u.y);
    let z = Float::sqrt(Float::max(0.0, 1.0 - u.y));
    Vec3f::new(r * theta.cos(), r * theta.sin(), z)
}

pub fn cosine_hemisphere_pdf(cos_theta: Float) -> Float {
    cos_theta.abs() / PI
}

/// Cumulative distribution over a set of non-negative weights, sampled by
/// linear search from the first bucket whose cumulative mass exceeds `u`.
/// An all-zero input collapses to a single bucket of mass 1 (a no-op
/// distribution that always returns index 0).
pub struct DiscreteDistribution {
    thresholds: Vec<Float>,
    masses: Vec<Float>,
}

impl DiscreteDistribution {
    pub fn new(weights: &[Float]) -> Self {
        if weights.is_empty() {
            return Self { thresholds: vec![1.0], masses: vec![1.0] };
        }

        let mut thresholds = Vec::with_capacity(weights.len());
        let mut acc = 0.0;
        for &w in weights {
            debug_assert!(w >= 0.0, "distribution weights must be non-negative");
            acc += w;
            thresholds.push(acc);
        }

        if acc > 0.0 {
            for t in thresholds.iter_mut() {
                *t /= acc;
            }
        } else {
            thresholds = vec![1.0; weights.len()];
        }

        let masses = std::iter::once(thresholds[0])
            .chain(thresholds.windows(2).map(|w| w[1] - w[0]))
            .collect();

        Self { thresholds, masses }
    }

    /// Returns `(index, pmf)`. `u` is assumed to be in `[0, 1)`.
    pub fn sample(&self, u: Float) -> (usize, Float) {
        if u < self.thresholds[0] {
            return (0, self.masses[0]);
        }

        for i in 1..self.thresholds.len() {
            if u >= self.thresholds[i - 1] && u < self.thresholds[i] {
                return (i, self.masses[i]);
            }
        }

        (self.thresholds.len() - 1, *self.masses.last().unwrap())
    }

    pub fn pmf(&self, index: usize) -> Float {
        self.masses[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn empty_weights_collapse_to_single_bucket() {
        let d = DiscreteDistribution::new(&[]);
        let (idx, pmf) = d.sample(0.0);
        assert_eq!(idx, 0);
        assert_relative_eq!(pmf, 1.0);
    }

    #[test]
    fn all_zero_weights_collapse_to_uniform_single_bucket() {
        let d = DiscreteDistribution::new(&[0.0, 0.0, 0.0]);
        let (_, pmf) = d.sample(0.5);
        assert_relative_eq!(pmf, 1.0);
    }

    #[test]
    fn sample_respects_relative_weights() {
        let d = DiscreteDistribution::new(&[1.0, 3.0]);
        assert_eq!(d.sample(0.1).0, 0);
        assert_eq!(d.sample(0.9).0, 1);
        assert_relative_eq!(d.pmf(0), 0.25, epsilon = 1e-6);
        assert_relative_eq!(d.pmf(1), 0.75, epsilon = 1e-6);
    }

    /// `sum(1/pdf(wi))/N` over cosine-weighted samples estimates the
    /// hemisphere's solid angle (2*pi), confirming the pdf integrates to 1.
    #[test]
    fn cosine_hemisphere_pdf_integrates_to_one() {
        let mut rng = crate::rng::Rng::new(7);
        let n = 1_000_000;
        let mut sum = 0.0;
        for _ in 0..n {
            let u = rng.uniform_2d();
            let w = cosine_sample_hemisphere(u);
            sum += 1.0 / cosine_hemisphere_pdf(w.z);
        }
        let estimate = sum / n as Float;
        assert_relative_eq!(estimate, 2.0 * PI, epsilon = 5e-2);
    }

    /// S4: sum of cos(theta)/pdf over samples converges to pi.
    #[test]
    fn cosine_weighted_sampler_integrates_cosine_to_pi() {
        let mut rng = crate::rng::Rng::new(11);
        let n = 1_000_000;
        let mut sum = 0.0;
        for _ in 0..n {
            let u = rng.uniform_2d();
            let w = cosine_sample_hemisphere(u);
            sum += w.z / cosine_hemisphere_pdf(w.z);
        }
        let estimate = sum / n as Float;
        assert_relative_eq!(estimate, PI, epsilon = 5e-2);
    }
}
