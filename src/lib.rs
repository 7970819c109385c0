//! A small offline, physically based Monte Carlo path tracer.
//!
//! Geometry, shading and integration are plain data and traits threaded
//! through explicit contexts (`Rng`, `Workspace`) rather than hidden behind
//! global state, so that a render can be split across worker threads with
//! nothing but `&Scene` shared.

pub mod bvh;
pub mod camera;
pub mod err_float;
pub mod fresnel;
pub mod geometry;
pub mod integrator;
pub mod interaction;
pub mod light;
pub mod material;
pub mod math;
pub mod primitive;
pub mod reflection;
pub mod rng;
pub mod sampling;
pub mod scene;
pub mod spectrum;
pub mod texture;
pub mod workspace;

pub use cgmath::{Point2, Point3, Vector2, Vector3};

/// All geometric quantities are single precision; the renderer never needs
/// more range or precision than `f32` gives, and halving width keeps the BVH
/// and workspace cache friendly.
pub type Float = f32;

pub type Vec3f = cgmath::Vector3<Float>;
pub type Vec2f = cgmath::Vector2<Float>;
pub type Point3f = cgmath::Point3<Float>;
pub type Point2f = cgmath::Point2<Float>;
pub type Point2i = cgmath::Point2<i32>;

/// A surface normal. Kept distinct from `Vec3f` because the two transform
/// differently under a non-uniform scale: vectors by the matrix, normals by
/// the transpose of its inverse.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Normal3(pub Vec3f);

impl Normal3 {
    pub fn new(x: Float, y: Float, z: Float) -> Self {
        Self(Vec3f::new(x, y, z))
    }

    pub fn normalize(self) -> Self {
        use cgmath::InnerSpace;
        Self(self.0.normalize())
    }

    pub fn dot(self, v: Vec3f) -> Float {
        use cgmath::InnerSpace;
        self.0.dot(v)
    }
}

impl std::ops::Neg for Normal3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl From<Vec3f> for Normal3 {
    fn from(v: Vec3f) -> Self {
        Self(v)
    }
}
