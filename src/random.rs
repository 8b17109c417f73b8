//! Randomness provider consumed by stochastic rule sets.
//!
//! The engine only ever calls [`RandomSource::next_int`]. Seeding and resetting belong to
//! whoever owns the source, which is handed to each rewrite call explicitly.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniformly distributed integers.
pub trait RandomSource {
    /// Returns an integer in the half-open range `[min, max)`.
    /// Implementations return `min` when the range is empty.
    fn next_int(&mut self, min: i32, max: i32) -> i32;
}

/// Reproducible [`RandomSource`] backed by [`StdRng`].
///
/// Remembers its seed so [`reset`](Self::reset) can replay the exact same stream.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    seed: u64,
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeds from the thread-local generator; the chosen seed is still recorded.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Replaces the seed and restarts the stream from it.
    pub fn set_seed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Restarts the stream from the current seed.
    pub fn reset(&mut self) {
        self.set_seed(self.seed);
    }
}

impl Default for SeededRandom {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for SeededRandom {
    fn next_int(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..max)
    }
}
