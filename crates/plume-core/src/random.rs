//! Randomness consumed by the simulation.
//!
//! Everything that rolls dice takes a `RandomSource` so tests can seed it.
//! Any `rand::Rng` (e.g. `StdRng::seed_from_u64`) is a `RandomSource`.

use rand::seq::SliceRandom;
use rand::Rng;

pub trait RandomSource {
    /// Uniform real in [0, 1).
    fn next_unit(&mut self) -> f32;

    /// Uniform integer in [0, n). `n` must be non-zero.
    fn next_below(&mut self, n: u32) -> u32;

    /// Uniform integer in [min, max]. Covers the whole `u32` range.
    fn next_between(&mut self, min: u32, max: u32) -> u32;

    /// Fair coin flip.
    fn next_bool(&mut self) -> bool;

    /// Uniform in-place permutation.
    fn shuffle<T>(&mut self, items: &mut [T]);
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn next_unit(&mut self) -> f32 {
        self.gen::<f32>()
    }

    fn next_below(&mut self, n: u32) -> u32 {
        self.gen_range(0..n)
    }

    fn next_between(&mut self, min: u32, max: u32) -> u32 {
        self.gen_range(min..=max)
    }

    fn next_bool(&mut self) -> bool {
        self.gen::<bool>()
    }

    fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(self);
    }
}
