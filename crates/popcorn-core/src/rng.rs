//! Random selection abstraction for determinism.
//!
//! In production, this wraps a real RNG. In tests and replays,
//! a seeded or scripted implementation is injected.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniformly distributed positions within a candidate list.
pub trait DeterministicRng: Send + Sync {
    /// Pick an index in `[0, len)`, or `None` when `len` is zero.
    ///
    /// Callers still bounds-check the result, so an implementation that
    /// strays out of range yields no pick rather than a panic.
    fn next_index(&mut self, len: usize) -> Option<usize>;
}

/// Production RNG backed by [`StdRng`].
#[derive(Debug, Clone)]
pub struct SystemRng(StdRng);

impl SystemRng {
    /// Creates an RNG seeded from the operating system.
    #[must_use]
    pub fn from_os_rng() -> Self {
        Self(StdRng::from_os_rng())
    }

    /// Creates an RNG with a fixed seed, for replays and statistical tests.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl DeterministicRng for SystemRng {
    fn next_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.0.random_range(0..len))
    }
}
