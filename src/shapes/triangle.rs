use std::sync::Arc;

use cgmath::{EuclideanSpace, InnerSpace};

use crate::err_float::gamma;
use crate::geometry::bounds::Bounds3f;
use crate::geometry::{Ray, Transform};
use crate::interaction::Interaction;
use crate::shapes::Shape;
use crate::{Float, Normal3, Point2f, Point3f, Vec3f};

/// Shared vertex/index/attribute buffers for a set of triangles, with the
/// placement transform baked into world-space vertices at construction.
pub struct TriangleMesh {
    pub n_triangles: u32,
    vertex_indices: Vec<u32>,
    vertices: Vec<Point3f>,
    normals: Option<Vec<Vec3f>>,
    tex_coords: Option<Vec<Point2f>>,
}

impl TriangleMesh {
    /// Fails if the index buffer isn't a triangle list or references a
    /// vertex outside the buffer it was handed; a loaded mesh is the one
    /// place this crate takes data it didn't construct itself.
    pub fn new(
        object_to_world: &Transform,
        vertex_indices: Vec<u32>,
        mut vertices: Vec<Point3f>,
        mut normals: Option<Vec<Vec3f>>,
        tex_coords: Option<Vec<Point2f>>,
    ) -> anyhow::Result<Self> {
        anyhow::ensure!(
            vertex_indices.len() % 3 == 0,
            "triangle index buffer length {} is not a multiple of 3",
            vertex_indices.len()
        );
        let n_vertices = vertices.len() as u32;
        for &idx in &vertex_indices {
            anyhow::ensure!(idx < n_vertices, "vertex index {} out of range for {} vertices", idx, n_vertices);
        }
        if let Some(ns) = &normals {
            anyhow::ensure!(ns.len() == vertices.len(), "normal buffer length {} does not match {} vertices", ns.len(), vertices.len());
        }
        if let Some(uvs) = &tex_coords {
            anyhow::ensure!(uvs.len() == vertices.len(), "uv buffer length {} does not match {} vertices", uvs.len(), vertices.len());
        }
        let n_triangles = vertex_indices.len() as u32 / 3;

        for v in &mut vertices {
            *v = object_to_world.transform_point(*v);
        }
        if let Some(ref mut ns) = normals {
            for n in ns.iter_mut() {
                *n = object_to_world.transform_normal(Normal3(*n)).0;
            }
        }

        Ok(Self { n_triangles, vertex_indices, vertices, normals, tex_coords })
    }

    pub fn iter_triangles(self: &Arc<Self>) -> impl Iterator<Item = Triangle> + '_ {
        (0..self.n_triangles).map(move |tri_id| Triangle::new(Arc::clone(self), tri_id))
    }
}

pub struct Triangle {
    mesh: Arc<TriangleMesh>,
    tri_id: u32,
}

impl Triangle {
    pub fn new(mesh: Arc<TriangleMesh>, tri_id: u32) -> Self {
        Self { mesh, tri_id }
    }

    fn vertex_indices(&self) -> [u32; 3] {
        let idx = self.tri_id as usize;
        [
            self.mesh.vertex_indices[3 * idx],
            self.mesh.vertex_indices[3 * idx + 1],
            self.mesh.vertex_indices[3 * idx + 2],
        ]
    }

    fn vertices(&self) -> [Point3f; 3] {
        let v = self.vertex_indices();
        [self.mesh.vertices[v[0] as usize], self.mesh.vertices[v[1] as usize], self.mesh.vertices[v[2] as usize]]
    }

    fn normals(&self) -> Option<[Vec3f; 3]> {
        self.mesh.normals.as_ref().map(|ns| {
            let v = self.vertex_indices();
            [ns[v[0] as usize], ns[v[1] as usize], ns[v[2] as usize]]
        })
    }

    fn uvs(&self) -> [Point2f; 3] {
        match &self.mesh.tex_coords {
            Some(uvs) => {
                let v = self.vertex_indices();
                [uvs[v[0] as usize], uvs[v[1] as usize], uvs[v[2] as usize]]
            }
            None => [Point2f::new(0.0, 0.0), Point2f::new(1.0, 0.0), Point2f::new(1.0, 1.0)],
        }
    }

    pub fn face_index(&self) -> u32 {
        self.tri_id
    }
}

fn max_dimension(v: Vec3f) -> usize {
    if v.x > v.y && v.x > v.z {
        0
    } else if v.y > v.z {
        1
    } else {
        2
    }
}

fn permute(v: Vec3f, kx: usize, ky: usize, kz: usize) -> Vec3f {
    let a = [v.x, v.y, v.z];
    Vec3f::new(a[kx], a[ky], a[kz])
}

#[inline]
fn sign_differs(v1: Float, v2: Float, v3: Float) -> bool {
    v1.is_sign_positive() != v2.is_sign_positive() || v2.is_sign_positive() != v3.is_sign_positive()
}

impl Shape for Triangle {
    fn area(&self) -> Float {
        let [p0, p1, p2] = self.vertices();
        0.5 * (p1 - p0).cross(p2 - p0).magnitude()
    }

    fn bounds(&self) -> Bounds3f {
        let [p0, p1, p2] = self.vertices();
        Bounds3f::empty().join_point(&p0).join_point(&p1).join_point(&p2)
    }

    /// Translate-permute-shear technique (Woop et al.): transforms the
    /// triangle into a frame where the ray is the +z axis through the
    /// origin, so the intersection test reduces to 2D edge functions. Kept
    /// because it is watertight at grazing angles in a way a raw
    /// Moller-Trumbore division is not.
    fn intersect(&self, ray: &Ray, t_min: Float, t_max: Float) -> Option<Interaction<'static>> {
        let [p0, p1, p2] = self.vertices();

        let mut p0t = p0 - ray.origin.to_vec();
        let mut p1t = p1 - ray.origin.to_vec();
        let mut p2t = p2 - ray.origin.to_vec();

        let kz = max_dimension(Vec3f::new(ray.dir.x.abs(), ray.dir.y.abs(), ray.dir.z.abs()));
        let kx = (kz + 1) % 3;
        let ky = (kx + 1) % 3;
        let dir = permute(ray.dir, kx, ky, kz);
        p0t = permute(p0t, kx, ky, kz);
        p1t = permute(p1t, kx, ky, kz);
        p2t = permute(p2t, kx, ky, kz);

        let shear_x = -dir.x / dir.z;
        let shear_y = -dir.y / dir.z;
        let shear_z = 1.0 / dir.z;
        p0t.x += shear_x * p0t.z;
        p0t.y += shear_y * p0t.z;
        p1t.x += shear_x * p1t.z;
        p1t.y += shear_y * p1t.z;
        p2t.x += shear_x * p2t.z;
        p2t.y += shear_y * p2t.z;

        let mut e0 = p1t.x * p2t.y - p1t.y * p2t.x;
        let mut e1 = p2t.x * p0t.y - p2t.y * p0t.x;
        let mut e2 = p0t.x * p1t.y - p0t.y * p1t.x;

        if e0 == 0.0 || e1 == 0.0 || e2 == 0.0 {
            e0 = (p1t.x as f64 * p2t.y as f64 - p1t.y as f64 * p2t.x as f64) as Float;
            e1 = (p2t.x as f64 * p0t.y as f64 - p2t.y as f64 * p0t.x as f64) as Float;
            e2 = (p0t.x as f64 * p1t.y as f64 - p0t.y as f64 * p1t.x as f64) as Float;
        }

        if sign_differs(e0, e1, e2) {
            return None;
        }
        let det = e0 + e1 + e2;
        if det == 0.0 {
            return None;
        }

        p0t.z *= shear_z;
        p1t.z *= shear_z;
        p2t.z *= shear_z;
        let t_scaled = e0 * p0t.z + e1 * p1t.z + e2 * p2t.z;

        if det < 0.0 && (t_scaled >= t_min * det || t_scaled < t_max * det)
            || det > 0.0 && (t_scaled <= t_min * det || t_scaled > t_max * det)
        {
            return None;
        }

        let inv_det = 1.0 / det;
        let b0 = e0 * inv_det;
        let b1 = e1 * inv_det;
        let b2 = e2 * inv_det;
        let t = t_scaled * inv_det;

        let max_zt = p0t.z.abs().max(p1t.z.abs()).max(p2t.z.abs());
        let delta_z = gamma(3) * max_zt;
        let max_xt = p0t.x.abs().max(p1t.x.abs()).max(p2t.x.abs());
        let max_yt = p0t.y.abs().max(p1t.y.abs()).max(p2t.y.abs());
        let delta_x = gamma(5) * (max_xt + max_zt);
        let delta_y = gamma(5) * (max_yt + max_zt);
        let delta_e = 2.0 * (gamma(2) * max_xt * max_yt + delta_y * max_xt + delta_x * max_yt);
        let max_e = e0.abs().max(e1.abs()).max(e2.abs());
        let delta_t = 3.0 * (gamma(3) * max_e * max_zt + delta_e * max_zt + delta_z * max_e) * inv_det.abs();
        if t <= delta_t {
            return None;
        }

        let dp02 = p0 - p2;
        let dp12 = p1 - p2;
        let mut ng = dp02.cross(dp12);
        if ng.magnitude2() == 0.0 {
            return None;
        }
        ng = ng.normalize();
        let ng = Normal3(ng);

        let uvs = self.uvs();
        let uv = Point2f::new(
            b0 * uvs[0].x + b1 * uvs[1].x + b2 * uvs[2].x,
            b0 * uvs[0].y + b1 * uvs[1].y + b2 * uvs[2].y,
        );
        let point = Point3f::from_vec(b0 * p0.to_vec() + b1 * p1.to_vec() + b2 * p2.to_vec());

        let ns = match self.normals() {
            Some([n0, n1, n2]) => {
                let n = (b0 * n0 + b1 * n1 + b2 * n2).normalize();
                if n.dot(ng.0) < 0.0 {
                    Normal3(-n)
                } else {
                    Normal3(n)
                }
            }
            None => ng,
        };

        Some(Interaction::new(t, point, ng, ns, uv).with_face_index(self.tri_id))
    }

    fn occlude(&self, ray: &Ray, t_min: Float, t_max: Float) -> Option<Float> {
        self.intersect(ray, t_min, t_max).map(|it| it.t)
    }

    fn sample_point(&self, u: Point2f) -> (Point3f, Normal3, Float) {
        let t = u.x.sqrt();
        let b0 = 1.0 - t;
        let b1 = (1.0 - u.y) * t;
        let b2 = u.y * t;
        let [p0, p1, p2] = self.vertices();
        let point = Point3f::from_vec(b0 * p0.to_vec() + b1 * p1.to_vec() + b2 * p2.to_vec());
        let n = Normal3((p1 - p0).cross(p2 - p0).normalize());
        (point, n, 1.0 / self.area())
    }
}
