//! The per-interaction BSDF: an orthonormal shading frame plus a small sum
//! of lobes (`BxDF`s), all allocated in the per-ray [`Workspace`].
//!
//! Per spec §4.G every BSDF operation — `eval`, `sample`, `pdf` — takes and
//! returns directions already in the local frame; the integrator is
//! responsible for transforming `-ray.dir` into local space once per bounce
//! and the sampled `wi` back to world space.
//!
//! [`Workspace`]: crate::workspace::Workspace

use crate::math::coordinate_system;
use crate::reflection::{BxDF, BxDFType, ScatterSample};
use crate::spectrum::Rgb;
use crate::{Float, Normal3, Point2f, Vec3f};
use arrayvec::ArrayVec;
use cgmath::InnerSpace;

const MAX_LOBES: usize = 4;

pub struct Bsdf<'w> {
    ns: Normal3,
    ng: Normal3,
    ss: Vec3f,
    ts: Vec3f,
    lobes: ArrayVec<[&'w dyn BxDF; MAX_LOBES]>,
}

impl<'w> Bsdf<'w> {
    /// Builds the local frame from the shading normal, per the
    /// tangent-construction in spec §4.G ("if `n.x != 0 || n.y != 0`...").
    pub fn new(ns: Normal3, ng: Normal3) -> Self {
        let (ss, _) = coordinate_system(ns.0);
        let ts = ns.0.cross(ss);
        Self { ns, ng, ss, ts, lobes: ArrayVec::new() }
    }

    pub fn add(&mut self, lobe: &'w dyn BxDF) {
        self.lobes.push(lobe);
    }

    pub fn world_to_local(&self, v: Vec3f) -> Vec3f {
        Vec3f::new(v.dot(self.ss), v.dot(self.ts), v.dot(self.ns.0))
    }

    pub fn local_to_world(&self, v: Vec3f) -> Vec3f {
        Vec3f::new(
            self.ss.x * v.x + self.ts.x * v.y + self.ns.0.x * v.z,
            self.ss.y * v.x + self.ts.y * v.y + self.ns.0.y * v.z,
            self.ss.z * v.x + self.ts.z * v.y + self.ns.0.z * v.z,
        )
    }

    /// The OR of every lobe's type tag; `type().is_specular()` tells the
    /// integrator whether this interaction's surface is purely specular.
    pub fn bsdf_type(&self) -> BxDFType {
        self.lobes.iter().fold(BxDFType::empty(), |acc, l| acc | l.get_type())
    }

    fn reflect_or_transmit(&self, wo_world: Vec3f, wi_world: Vec3f) -> bool {
        wi_world.dot(self.ng.0) * wo_world.dot(self.ng.0) > 0.0
    }

    /// `eval(wo, wi)` in local frame, summed over lobes whose reflect/
    /// transmit side matches the geometric-normal test (so a glossy
    /// reflection lobe never leaks across the surface).
    pub fn eval(&self, wo: Vec3f, wi: Vec3f) -> Rgb {
        if wo.z == 0.0 {
            return Rgb::BLACK;
        }
        let wo_world = self.local_to_world(wo);
        let wi_world = self.local_to_world(wi);
        let reflect = self.reflect_or_transmit(wo_world, wi_world);
        self.lobes
            .iter()
            .filter(|l| {
                (reflect && l.get_type().contains(BxDFType::REFLECTION))
                    || (!reflect && l.get_type().contains(BxDFType::TRANSMISSION))
            })
            .map(|l| l.f(wo, wi))
            .sum()
    }

    /// Picks a lobe uniformly, importance-samples it, and — for non-
    /// specular surfaces with more than one lobe — sums `f`/`pdf` across
    /// every matching lobe so the estimator accounts for the whole surface.
    pub fn sample(&self, u: Point2f, wo: Vec3f) -> Option<(Vec3f, Rgb, Float, BxDFType)> {
        if self.lobes.is_empty() || wo.z == 0.0 {
            return None;
        }
        let n = self.lobes.len() as Float;
        let comp = ((u.x * n) as usize).min(self.lobes.len() - 1);
        let lobe = self.lobes[comp];
        let u_remapped = Point2f::new(u.x * n - comp as Float, u.y);

        let ScatterSample { wi, mut f, mut pdf, sampled_type } = lobe.sample_f(wo, u_remapped)?;
        if pdf == 0.0 {
            return None;
        }

        if !sampled_type.is_specular() && self.lobes.len() > 1 {
            pdf += self.lobes.iter().filter(|&&l| !std::ptr::eq(l, lobe)).map(|l| l.pdf(wo, wi)).sum::<Float>();
            pdf /= n;

            let wo_world = self.local_to_world(wo);
            let wi_world = self.local_to_world(wi);
            let reflect = self.reflect_or_transmit(wo_world, wi_world);
            f = self
                .lobes
                .iter()
                .filter(|l| {
                    (reflect && l.get_type().contains(BxDFType::REFLECTION))
                        || (!reflect && l.get_type().contains(BxDFType::TRANSMISSION))
                })
                .map(|l| l.f(wo, wi))
                .sum();
        }

        Some((wi, f, pdf, sampled_type))
    }

    pub fn pdf(&self, wo: Vec3f, wi: Vec3f) -> Float {
        if self.lobes.is_empty() || wo.z == 0.0 {
            return 0.0;
        }
        let sum: Float = self.lobes.iter().map(|l| l.pdf(wo, wi)).sum();
        sum / self.lobes.len() as Float
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflection::LambertianReflection;
    use approx::assert_relative_eq;

    #[test]
    fn frame_round_trips_world_to_local() {
        let ns = Normal3(Vec3f::new(0.3, 0.6, 0.742).normalize());
        let bsdf = Bsdf::new(ns, ns);
        let v = Vec3f::new(0.1, -0.4, 0.8).normalize();
        let local = bsdf.world_to_local(v);
        let back = bsdf.local_to_world(local);
        assert_relative_eq!(back.x, v.x, epsilon = 1e-5);
        assert_relative_eq!(back.y, v.y, epsilon = 1e-5);
        assert_relative_eq!(back.z, v.z, epsilon = 1e-5);
    }

    #[test]
    fn single_lambertian_lobe_matches_bxdf_directly() {
        let n = Normal3::new(0.0, 0.0, 1.0);
        let mut bsdf = Bsdf::new(n, n);
        let lobe = LambertianReflection::new(Rgb::new(0.5));
        bsdf.add(&lobe);
        let wo = Vec3f::new(0.0, 0.0, 1.0);
        let wi = Vec3f::new(0.0, 0.0, 1.0);
        assert_relative_eq!(bsdf.eval(wo, wi).r(), 0.5 * std::f32::consts::FRAC_1_PI, epsilon = 1e-6);
        assert!(!bsdf.bsdf_type().is_specular());
    }
}
