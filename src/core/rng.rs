//! Deterministic random number generation with forking for parallel instances.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces the identical deal sequence
//! - **Forkable**: Create independent streams for vectorized self-play,
//!   one engine instance per worker with zero shared state
//!
//! ## Usage
//!
//! ```
//! use mus_engine::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//!
//! // Fork for an independent environment instance
//! let mut worker_rng = rng.fork();
//!
//! // Original and fork produce different sequences
//! let a: Vec<usize> = (0..8).map(|_| rng.gen_range(0..1000)).collect();
//! let b: Vec<usize> = (0..8).map(|_| worker_rng.gen_range(0..1000)).collect();
//! assert_ne!(a, b);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG backing every shuffle and chance event in the engine.
///
/// Uses ChaCha8 for speed while maintaining high-quality randomness.
/// Each engine instance owns exactly one `GameRng`; forks give derived
/// but independent streams for parallel instances.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fork this RNG to create an independent stream.
    ///
    /// Each fork produces a different but deterministic sequence; the
    /// n-th fork of two RNGs with the same seed is identical.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
        }
    }

    /// Generate a random usize in the given range.
    pub fn gen_range(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Generate a random boolean with the given probability of `true`.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}
