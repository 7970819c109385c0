//! The integrator layer ties the scene, BVH, BSDFs and lights together into
//! a per-ray radiance estimate. Spec §4.J / §9 specify exactly one
//! estimator — an unidirectional path tracer with per-bounce direct-light
//! sampling over every light and no MIS between the light- and BSDF-sampled
//! strategies — so [`path::PathIntegrator`] is the only strategy
//! implemented here.
//!
//! The outer per-pixel loop, tile scheduling and progress reporting are
//! external collaborators (spec §1 Non-goals / Out of scope): this module
//! exposes only the one synchronous call, `PathIntegrator::li`, that a host
//! loop invokes once per ray, concurrently across worker threads each
//! holding its own [`crate::rng::Rng`] and [`crate::workspace::Workspace`].

pub mod path;

pub use path::PathIntegrator;
