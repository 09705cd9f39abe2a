//! Gems: the clickable slots and the points hidden behind them.

use serde::{Deserialize, Serialize};

/// Slot identifier for a gem. Slots are numbered `0..gem_count` and stay
/// fixed across rounds; only the values behind them change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GemId(pub u8);

impl GemId {
    /// Create a new gem ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Iterate over the first `count` slot IDs.
    pub fn all(count: usize) -> impl Iterator<Item = GemId> {
        (0..count).map(|i| GemId(i as u8))
    }
}

impl std::fmt::Display for GemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Gem({})", self.0)
    }
}

/// A gem dealt for the current round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gem {
    pub id: GemId,
    pub value: u32,
}

impl Gem {
    #[must_use]
    pub const fn new(id: GemId, value: u32) -> Self {
        Self { id, value }
    }
}
