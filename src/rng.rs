//! Per-thread random number source.
//!
//! Unlike a thread-local singleton, an `Rng` is an owned value that is
//! constructed once per worker and threaded explicitly through the
//! integrator call, so that rendering is parallelizable without any hidden
//! global mutable state.

use rand_xoshiro::rand_core::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256Plus;

use crate::{Float, Point2f};

pub struct Rng {
    state: Xoshiro256Plus,
}

impl Rng {
    /// Seeds the generator from a 64-bit seed. `Xoshiro256Plus::seed_from_u64`
    /// runs the seed through a splitmix64 step internally, which guarantees
    /// the resulting 256-bit state is never all-zero.
    pub fn new(seed: u64) -> Self {
        Self { state: Xoshiro256Plus::seed_from_u64(seed) }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state.next_u64()
    }

    /// Uniform float in `[0, 1)`: take the high 23 bits of `next_u64()`,
    /// OR in an exponent field of 127 (giving a float in `[1, 2)`), then
    /// subtract 1.
    pub fn uniform_f32(&mut self) -> Float {
        let bits = (self.next_u64() >> 41) as u32; // top 23 bits
        let one_to_two = (bits | (127 << 23)).into();
        f32::from_bits(one_to_two) - 1.0
    }

    pub fn uniform_2d(&mut self) -> Point2f {
        Point2f::new(self.uniform_f32(), self.uniform_f32())
    }
}
