//! Integration test for the BVH and the triangle's Woop et al. translate-
//! permute-shear intersection routine: a closed mesh must never leak rays
//! through the shared edge between two adjacent triangles. A unit cube
//! built from 12 triangles, with every ray fired from its interior, is the
//! simplest closed manifold that can expose a crack: any miss is either a
//! watertightness bug in `Triangle::intersect` or a primitive the BVH
//! dropped while splitting.

use cgmath::InnerSpace;
use pathtracer_core::bvh::Bvh;
use pathtracer_core::geometry::transform::Transform;
use pathtracer_core::geometry::Ray;
use pathtracer_core::primitive::{GeometricPrimitive, Primitive};
use pathtracer_core::rng::Rng;
use pathtracer_core::shapes::triangle::TriangleMesh;
use pathtracer_core::{Float, Point3f, Vec3f};
use std::sync::Arc;

/// Unit cube centered on the origin, 12 triangles, 2 per face. Winding is
/// not uniformly outward-facing; `Triangle::intersect` has no back-face
/// cull, so that doesn't affect hit detection.
fn unit_cube_bvh() -> Bvh<Box<dyn Primitive>> {
    let vertices = vec![
        Point3f::new(-1.0, -1.0, -1.0), // 0
        Point3f::new(1.0, -1.0, -1.0),  // 1
        Point3f::new(1.0, 1.0, -1.0),   // 2
        Point3f::new(-1.0, 1.0, -1.0),  // 3
        Point3f::new(-1.0, -1.0, 1.0),  // 4
        Point3f::new(1.0, -1.0, 1.0),   // 5
        Point3f::new(1.0, 1.0, 1.0),    // 6
        Point3f::new(-1.0, 1.0, 1.0),   // 7
    ];
    #[rustfmt::skip]
    let indices: Vec<u32> = vec![
        0, 2, 1,  0, 3, 2, // back   z = -1
        4, 5, 6,  4, 6, 7, // front  z = +1
        0, 7, 3,  0, 4, 7, // left   x = -1
        1, 2, 6,  1, 6, 5, // right  x = +1
        0, 1, 5,  0, 5, 4, // bottom y = -1
        3, 6, 2,  3, 7, 6, // top    y = +1
    ];
    let mesh = Arc::new(TriangleMesh::new(&Transform::IDENTITY, indices, vertices, None, None).expect("well-formed cube mesh"));

    let prims: Vec<Box<dyn Primitive>> = mesh
        .iter_triangles()
        .map(|tri| Box::new(GeometricPrimitive::new(Arc::new(tri), None, false)) as Box<dyn Primitive>)
        .collect();
    Bvh::build(prims)
}

#[test]
fn random_rays_from_interior_always_escape_through_a_face() {
    let bvh = unit_cube_bvh();
    let mut rng = Rng::new(7);

    for _ in 0..100_000 {
        let dir = Vec3f::new(
            rng.uniform_f32() * 2.0 - 1.0,
            rng.uniform_f32() * 2.0 - 1.0,
            rng.uniform_f32() * 2.0 - 1.0,
        );
        if dir.magnitude2() < 1e-12 {
            continue;
        }
        let dir = dir.normalize();
        let ray = Ray::new(Point3f::new(0.0, 0.0, 0.0), dir);

        assert!(bvh.intersect(&ray, 0.0, Float::INFINITY).is_some(), "ray {:?} failed to hit the cube", dir);
        assert!(bvh.occlude(&ray, 0.0, Float::INFINITY), "occlusion query disagreed with intersect for {:?}", dir);
    }
}

/// Rays aimed at the split diagonal of each face are the most likely place
/// for a crack to show up, since they graze the shared edge between the
/// two triangles that tile the face.
#[test]
fn rays_along_face_diagonals_hit_the_shared_edge_without_leaking() {
    let bvh = unit_cube_bvh();

    let targets = [
        Point3f::new(0.0, 0.0, -1.0), // back face diagonal midpoint
        Point3f::new(0.0, 0.0, 1.0),
        Point3f::new(-1.0, 0.0, 0.0),
        Point3f::new(1.0, 0.0, 0.0),
        Point3f::new(0.0, -1.0, 0.0),
        Point3f::new(0.0, 1.0, 0.0),
    ];

    for &t in &targets {
        let dir = (t - Point3f::new(0.0, 0.0, 0.0)).normalize();
        let ray = Ray::new(Point3f::new(0.0, 0.0, 0.0), dir);
        let isect = bvh.intersect(&ray, 0.0, Float::INFINITY);
        assert!(isect.is_some(), "edge-grazing ray toward {:?} leaked through the mesh", t);
    }
}

#[test]
fn rays_from_outside_miss_when_aimed_away_from_the_cube() {
    let bvh = unit_cube_bvh();
    let ray = Ray::new(Point3f::new(10.0, 10.0, 10.0), Vec3f::new(0.0, 0.0, 1.0));
    assert!(bvh.intersect(&ray, 0.0, Float::INFINITY).is_none());
    assert!(!bvh.occlude(&ray, 0.0, Float::INFINITY));
}
