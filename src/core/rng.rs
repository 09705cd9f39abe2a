//! Deterministic random number generation for round setup.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical rounds
//! - **Rejection sampling**: Distinct gem values are drawn the slow, uniform way
//! - **Serializable**: O(1) state capture and restore
//!
//! ```
//! use gem_collector::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let values = rng.draw_distinct(1..=12, 4);
//! assert_eq!(values.len(), 4);
//! ```

use std::ops::RangeInclusive;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Deterministic RNG backing an engine instance.
///
/// Uses ChaCha8 so a checkpointed state can be replayed exactly.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed this engine was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random integer in the given inclusive range.
    pub fn gen_range(&mut self, range: RangeInclusive<u32>) -> u32 {
        self.inner.gen_range(range)
    }

    /// Draw `count` pairwise-distinct values uniformly from `range`.
    ///
    /// Values are drawn one at a time and duplicates are discarded, so the
    /// result keeps draw order. `count` must not exceed the size of the range.
    pub fn draw_distinct(&mut self, range: RangeInclusive<u32>, count: usize) -> SmallVec<[u32; 4]> {
        let span = (*range.end() as usize + 1).saturating_sub(*range.start() as usize);
        assert!(count <= span, "Cannot draw {count} distinct values from a range of {span}");

        let mut seen = FxHashSet::default();
        let mut values = SmallVec::new();

        while values.len() < count {
            let candidate = self.inner.gen_range(range.clone());
            if seen.insert(candidate) {
                values.push(candidate);
            }
        }

        values
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG state for reproducing a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}
