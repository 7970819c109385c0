//! Per-ray scratch allocator.
//!
//! A `Workspace` wraps a `bumpalo::Bump` arena. Every BSDF and any
//! temporary mesh-hit primitive produced while tracing a single ray is
//! allocated here; `reset()` at the top of the per-ray loop drops
//! everything at once rather than freeing objects individually.

use bumpalo::Bump;

pub struct Workspace {
    bump: Bump,
}

impl Workspace {
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    /// Allocates `value` in the arena and returns a reference valid until
    /// the next `reset()`.
    pub fn construct<T>(&self, value: T) -> &T {
        self.bump.alloc(value)
    }

    /// Drops every value allocated since the last reset and reclaims the
    /// underlying chunks for reuse. Types placed in the arena are expected
    /// to be trivially destructible (no `Drop` impls holding external
    /// resources); `bumpalo` does not run destructors on reset.
    pub fn reset(&mut self) {
        self.bump.reset();
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construct_returns_usable_value() {
        let ws = Workspace::new();
        let x = ws.construct(42i32);
        assert_eq!(*x, 42);
    }

    #[test]
    fn reset_reclaims_capacity() {
        let mut ws = Workspace::new();
        for i in 0..1000 {
            ws.construct(i as i64);
        }
        ws.reset();
        let y = ws.construct(7i64);
        assert_eq!(*y, 7);
    }
}
