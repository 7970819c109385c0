//! Texture evaluation contract. Per spec §6 an external texture "implements
//! `eval(uv, duv/dx, duv/dy) -> rgb`"; image filtering (mipmapping an
//! actual loaded texture) is outside the core's scope, so the only
//! implementation provided here is the constant texture every material
//! needs even when no image is bound.

use crate::{Point2f, Vec2f};

pub trait Texture<T>: Sync + Send {
    /// `uv` is the surface parametrization at the hit; `duv_dx`/`duv_dy`
    /// are the screen-space footprint of the ray differential, supplied
    /// for filtering by textures that need it (ignored by a constant).
    fn eval(&self, uv: Point2f, duv_dx: Vec2f, duv_dy: Vec2f) -> T;
}

pub struct ConstantTexture<T: Copy>(pub T);

impl<T: Copy + Sync + Send> Texture<T> for ConstantTexture<T> {
    fn eval(&self, _uv: Point2f, _duv_dx: Vec2f, _duv_dy: Vec2f) -> T {
        self.0
    }
}
