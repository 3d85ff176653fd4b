//! Deterministic random number generation for board setup.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical boards
//! - **Context streams**: Independent sequences for different purposes
//!   (choosing which icons to play vs. shuffling card positions)
//!
//! ```
//! use memory_match::core::GameRng;
//!
//! let rng = GameRng::new(42);
//! let mut picks = rng.for_context("pick");
//! let mut layout = rng.for_context("layout");
//!
//! // Streams are independent of each other
//! let a: Vec<_> = (0..8).map(|_| picks.gen_range_usize(0..100)).collect();
//! let b: Vec<_> = (0..8).map(|_| layout.gen_range_usize(0..100)).collect();
//! assert_ne!(a, b);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hash::{Hash, Hasher};

/// Seeded RNG used to pick and shuffle card faces.
///
/// Uses ChaCha8 for speed; uniform shuffles come from `rand`'s
/// Fisher-Yates implementation.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    reseed_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            reseed_counter: 0,
        }
    }

    /// Create an RNG seeded from the thread-local entropy source.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same RNG state.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        self.reseed_counter.hash(&mut hasher);
        context.hash(&mut hasher);
        let context_seed = hasher.finish();

        Self::new(context_seed)
    }

    /// Advance to a fresh, deterministic seed.
    ///
    /// Sessions call this before every rebuild so a restarted board is
    /// dealt differently while the whole game stays replayable from the
    /// original seed.
    pub fn advance(&mut self) {
        self.reseed_counter += 1;
        let next = self.seed.wrapping_add(self.reseed_counter.wrapping_mul(0x9E3779B97F4A7C15));
        self.inner = ChaCha8Rng::seed_from_u64(next);
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}
