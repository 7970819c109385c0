use crate::geometry::bounds::Bounds3f;
use crate::geometry::Ray;
use crate::{Float, Normal3, Point3f, Vec3f};
use cgmath::{InnerSpace, Matrix4, Rad, SquareMatrix, Transform as CgTransform};

#[derive(Clone, Copy, Debug)]
pub struct Transform {
    pub t: Matrix4<Float>,
    pub invt: Matrix4<Float>,
}

const IDENTITY_MAT4: Matrix4<Float> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 1.0, 0.0,
    0.0, 0.0, 0.0, 1.0,
);

impl Transform {
    pub const IDENTITY: Self = Transform::new(IDENTITY_MAT4, IDENTITY_MAT4);

    pub const fn new(mat: Matrix4<Float>, mat_inv: Matrix4<Float>) -> Self {
        Self { t: mat, invt: mat_inv }
    }

    pub fn from_mat(mat: Matrix4<Float>) -> Self {
        let m_inv = mat.invert().expect("transform matrix must be invertible");
        Self::new(mat, m_inv)
    }

    /// Builds a world-to-camera style basis from `pos`, a look-at point, and
    /// an up hint, returning the transform that maps world space into the
    /// coordinate frame with `pos` at the origin and `+z` toward `look_at`.
    pub fn look_at(pos: Point3f, look_at: Point3f, up: Vec3f) -> Self {
        let dir = (look_at - pos).normalize();
        let right = up.normalize().cross(dir).normalize();
        let new_up = dir.cross(right);

        let col0 = right.extend(0.0);
        let col1 = new_up.extend(0.0);
        let col2 = dir.extend(0.0);
        let col3 = cgmath::EuclideanSpace::to_homogeneous(pos);

        let mat = Matrix4::from_cols(col0, col1, col2, col3);
        let minv = mat.inverse_transform().unwrap();
        Self::new(minv, mat)
    }

    pub fn camera_look_at(pos: Point3f, look_at: Point3f, up: Vec3f) -> Self {
        Self::look_at(pos, look_at, up).inverse()
    }

    pub fn translate(delta: Vec3f) -> Self {
        let m = Matrix4::from_translation(delta);
        let m_inv = Matrix4::from_translation(-delta);
        Self::new(m, m_inv)
    }

    pub fn scale(sx: Float, sy: Float, sz: Float) -> Self {
        let m = Matrix4::from_nonuniform_scale(sx, sy, sz);
        let m_inv = Matrix4::from_nonuniform_scale(1.0 / sx, 1.0 / sy, 1.0 / sz);
        Self::new(m, m_inv)
    }

    pub fn rotate_x(theta: impl Into<Rad<Float>>) -> Self {
        let m = Matrix4::from_angle_x(theta);
        let m_inv = m.inverse_transform().unwrap();
        Self::new(m, m_inv)
    }

    pub fn rotate_y(theta: impl Into<Rad<Float>>) -> Self {
        let m = Matrix4::from_angle_y(theta);
        let m_inv = m.inverse_transform().unwrap();
        Self::new(m, m_inv)
    }

    pub fn rotate_z(theta: impl Into<Rad<Float>>) -> Self {
        let m = Matrix4::from_angle_z(theta);
        let m_inv = m.inverse_transform().unwrap();
        Self::new(m, m_inv)
    }

    pub fn identity() -> Self {
        Self::new(Matrix4::identity(), Matrix4::identity())
    }

    pub fn inverse(&self) -> Self {
        Self::new(self.invt, self.t)
    }

    pub fn swaps_handedness(&self) -> bool {
        self.t.determinant() < 0.0
    }

    /// Composes `self` followed by `next` (`next * self`).
    pub fn then(self, next: Self) -> Self {
        next * self
    }

    pub fn transform_point(&self, p: Point3f) -> Point3f {
        self.t.transform_point(p)
    }

    pub fn transform_vector(&self, v: Vec3f) -> Vec3f {
        self.t.transform_vector(v)
    }

    /// Transforms a normal by the transpose of the inverse, so that
    /// normals remain perpendicular to their surface under non-uniform
    /// scale.
    pub fn transform_normal(&self, n: Normal3) -> Normal3 {
        let v = n.0;
        let m = self.invt;
        Normal3(Vec3f::new(
            m[0][0] * v.x + m[1][0] * v.y + m[2][0] * v.z,
            m[0][1] * v.x + m[1][1] * v.y + m[2][1] * v.z,
            m[0][2] * v.x + m[1][2] * v.y + m[2][2] * v.z,
        ))
    }

    pub fn transform_ray(&self, r: &Ray) -> Ray {
        Ray::new(self.transform_point(r.origin), self.transform_vector(r.dir).normalize())
    }

    pub fn transform_bounds(&self, b: Bounds3f) -> Bounds3f {
        let corners = [
            Point3f::new(b.min.x, b.min.y, b.min.z),
            Point3f::new(b.max.x, b.min.y, b.min.z),
            Point3f::new(b.min.x, b.max.y, b.min.z),
            Point3f::new(b.min.x, b.min.y, b.max.z),
            Point3f::new(b.max.x, b.max.y, b.min.z),
            Point3f::new(b.max.x, b.min.y, b.max.z),
            Point3f::new(b.min.x, b.max.y, b.max.z),
            Point3f::new(b.max.x, b.max.y, b.max.z),
        ];
        corners.iter().fold(Bounds3f::empty(), |acc, &p| acc.join_point(&self.transform_point(p)))
    }
}

impl std::ops::Mul for Transform {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(self.t * rhs.t, rhs.invt * self.invt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{assert_abs_diff_eq, vec3};

    #[test]
    fn test_look_at() {
        let pos = Point3f::new(0.0, 0.0, -1.0);
        let tf = Transform::camera_look_at(pos, Point3f::new(0.0, 0.0, 0.0), Vec3f::new(0.0, 1.0, 0.0));

        let dir = Vec3f::new(0.0, 0.0, 1.0);
        let ray = Ray::new(Point3f::new(0.0, 0.0, 0.0), dir);
        let world_ray = tf.transform_ray(&ray);

        assert_abs_diff_eq!(world_ray.dir, dir, epsilon = 0.00001);
        assert_abs_diff_eq!(world_ray.origin, pos, epsilon = 0.00001);
    }

    #[test]
    fn test_point_transform() {
        let tf = Transform::scale(2.0, 2.0, 2.0) * Transform::translate(vec3(1.0, 1.0, 1.0));
        let p = Point3f::new(1.0, 1.0, 1.0);
        let pt = tf.transform_point(p);
        assert_abs_diff_eq!(Point3f::new(4.0, 4.0, 4.0), pt, epsilon = 0.00001);
    }

    #[test]
    fn test_vec_transform_ignores_translation() {
        let tf = Transform::scale(2.0, 2.0, 2.0) * Transform::translate(vec3(1.0, 1.0, 1.0));
        let v = Vec3f::new(1.0, 1.0, 1.0);
        let vt = tf.transform_vector(v);
        assert_abs_diff_eq!(Vec3f::new(2.0, 2.0, 2.0), vt, epsilon = 0.00001);
    }

    #[test]
    fn test_identity() {
        let tf = Transform::IDENTITY;
        let p = Point3f::new(1.0, 2.0, 3.0);
        assert_abs_diff_eq!(p, tf.transform_point(p), epsilon = 0.000001);
    }

    #[test]
    fn normal_survives_nonuniform_scale_perpendicular() {
        // a normal on the y=1 plane should stay perpendicular to any tangent
        // vector in that plane after a non-uniform scale.
        let tf = Transform::scale(2.0, 1.0, 3.0);
        let n = Normal3(Vec3f::new(0.0, 1.0, 0.0));
        let tangent = Vec3f::new(1.0, 0.0, 1.0);
        let nt = tf.transform_normal(n);
        let tt = tf.transform_vector(tangent);
        assert_abs_diff_eq!(nt.0.dot(tt), 0.0, epsilon = 1e-5);
    }
}
