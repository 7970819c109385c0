//! Adapted from the teacher's `cover_scene_time_per_pixel` benchmark: a
//! handful of spheres under a constant environment, measuring per-pixel
//! cost of the estimator instead of the old `Renderer`/`BlockedArray`
//! pipeline. Pixel rows render concurrently with `rayon`, each worker
//! holding its own `Rng`/`Workspace` as the integrator expects.

use criterion::{criterion_group, criterion_main, Criterion};
use pathtracer_core::camera::{CameraSetting, PerspectiveCamera};
use pathtracer_core::integrator::PathIntegrator;
use pathtracer_core::light::infinite::InfiniteAreaLight;
use pathtracer_core::light::point::PointLight;
use pathtracer_core::material::matte::MatteMaterial;
use pathtracer_core::material::metal::MetalMaterial;
use pathtracer_core::primitive::{GeometricPrimitive, Primitive};
use pathtracer_core::rng::Rng;
use pathtracer_core::scene::Scene;
use pathtracer_core::shapes::sphere::Sphere;
use pathtracer_core::spectrum::Rgb;
use pathtracer_core::texture::ConstantTexture;
use pathtracer_core::workspace::Workspace;
use pathtracer_core::{Point2f, Point3f, Vec3f};
use rayon::prelude::*;
use std::sync::Arc;
use std::time::Duration;

fn cover_scene() -> Scene {
    let mut prims: Vec<Box<dyn Primitive>> = Vec::new();

    let ground_material: Arc<dyn pathtracer_core::material::Material> =
        Arc::new(MatteMaterial::new(ConstantTexture(Rgb::rgb(0.5, 0.5, 0.5))));
    prims.push(Box::new(GeometricPrimitive::new(
        Arc::new(Sphere::new(Point3f::new(0.0, -1000.0, 0.0), 1000.0)),
        Some(ground_material),
        false,
    )));

    for a in -5..5 {
        for b in -5..5 {
            let center = Point3f::new(a as f32 + 0.4, 0.2, b as f32 + 0.4);
            let material: Arc<dyn pathtracer_core::material::Material> = if (a + b) % 2 == 0 {
                Arc::new(MatteMaterial::new(ConstantTexture(Rgb::rgb(0.6, 0.2, 0.2))))
            } else {
                Arc::new(MetalMaterial::new(ConstantTexture(Rgb::rgb(0.8, 0.8, 0.8)), ConstantTexture(0.2)))
            };
            prims.push(Box::new(GeometricPrimitive::new(Arc::new(Sphere::new(center, 0.2)), Some(material), false)));
        }
    }

    let sun: Arc<dyn pathtracer_core::light::Light> =
        Arc::new(PointLight::new(Point3f::new(10.0, 15.0, -5.0), Rgb::new(400.0)));
    let sky: Arc<dyn pathtracer_core::light::Light> =
        Arc::new(InfiniteAreaLight::new(ConstantTexture(Rgb::rgb(0.5, 0.7, 1.0)), 1e4));

    Scene::commit(prims, vec![sun], Some(sky))
}

fn render_row(scene: &Scene, camera: &PerspectiveCamera, integrator: &PathIntegrator, y: usize, width: usize, height: usize) -> Vec<Rgb> {
    (0..width)
        .map(|x| {
            let mut rng = Rng::new((y * width + x) as u64);
            let mut workspace = Workspace::new();
            let uv = Point2f::new((x as f32 + 0.5) / width as f32, (y as f32 + 0.5) / height as f32);
            let ray = camera.generate_ray(uv);
            integrator.li(ray, scene, &mut rng, &mut workspace)
        })
        .collect()
}

fn bench(c: &mut Criterion) {
    let width = 200usize;
    let height = 100usize;
    let scene = cover_scene();
    let camera = PerspectiveCamera::new(CameraSetting {
        position: Point3f::new(0.0, 2.0, -10.0),
        lookat: Vec3f::new(0.0, -0.1, 1.0),
        lookup: Vec3f::new(0.0, 1.0, 0.0),
        fov_y: std::f32::consts::FRAC_PI_4,
        aspect: width as f32 / height as f32,
    });
    let integrator = PathIntegrator::default();

    c.bench_function("cover_scene_rows_parallel", |b| {
        b.iter(|| {
            let rows: Vec<Vec<Rgb>> =
                (0..height).into_par_iter().map(|y| render_row(&scene, &camera, &integrator, y, width, height)).collect();
            rows
        })
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().measurement_time(Duration::from_secs(10));
    targets = bench
}
criterion_main!(benches);
