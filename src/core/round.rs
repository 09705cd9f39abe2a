//! Round state and the scoring rule.
//!
//! A round is dealt once and then only moves forward: the score grows by
//! one gem value per accepted choice and the outcome leaves `InProgress`
//! at most once.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::config::GameConfig;
use super::gem::{Gem, GemId};
use crate::error::GameError;

/// Gem set for one round.
pub type Gems = SmallVec<[Gem; 4]>;

/// How a round ended, if it has.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    InProgress,
    /// Score landed exactly on the target.
    Won,
    /// Score overshot the target.
    Lost,
}

impl Outcome {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self != Outcome::InProgress
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "in progress"),
            Outcome::Won => write!(f, "won"),
            Outcome::Lost => write!(f, "lost"),
        }
    }
}

/// One round from deal to win or loss.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// 1-based round counter within an engine.
    pub number: u64,
    pub target: u32,
    pub score: u32,
    pub outcome: Outcome,
    /// Accepted choices so far.
    pub choices: u32,
    pub gems: Gems,
}

impl Round {
    /// Deal a round; gem slots are assigned in the order of `values`.
    pub fn new(number: u64, target: u32, values: &[u32]) -> Self {
        let gems = GemId::all(values.len())
            .zip(values.iter().copied())
            .map(|(id, value)| Gem::new(id, value))
            .collect();

        Self {
            number,
            target,
            score: 0,
            outcome: Outcome::InProgress,
            choices: 0,
            gems,
        }
    }

    /// Check caller-chosen numbers against the config's invariants.
    pub fn validate_setup(config: &GameConfig, target: u32, values: &[u32]) -> Result<(), GameError> {
        if values.len() != config.gem_count {
            return Err(GameError::GemCount {
                expected: config.gem_count,
                actual: values.len(),
            });
        }

        let mut seen = FxHashSet::default();
        for &value in values {
            if !config.gem_values.contains(&value) {
                return Err(GameError::GemValueOutOfRange {
                    value,
                    min: *config.gem_values.start(),
                    max: *config.gem_values.end(),
                });
            }
            if !seen.insert(value) {
                return Err(GameError::DuplicateGemValue(value));
            }
        }

        if !config.target_range.contains(&target) {
            return Err(GameError::TargetOutOfRange {
                target,
                min: *config.target_range.start(),
                max: *config.target_range.end(),
            });
        }

        Ok(())
    }

    /// Look up a gem by slot.
    #[must_use]
    pub fn gem(&self, id: GemId) -> Option<&Gem> {
        self.gems.iter().find(|g| g.id == id)
    }

    /// Gem values in slot order.
    #[must_use]
    pub fn values(&self) -> SmallVec<[u32; 4]> {
        self.gems.iter().map(|g| g.value).collect()
    }

    /// Whether choices are still accepted.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.outcome.is_terminal()
    }

    /// Add a gem's value and evaluate the round.
    ///
    /// Returns the new outcome when this choice ended the round, `None` if
    /// the round continues or the choice was not accepted (closed round,
    /// unknown slot).
    pub fn choose(&mut self, id: GemId) -> Option<Outcome> {
        if !self.is_open() {
            return None;
        }
        let value = self.gem(id)?.value;
        self.choices += 1;

        // A sum past u32::MAX is past any target.
        let Some(score) = self.score.checked_add(value) else {
            self.score = u32::MAX;
            self.outcome = Outcome::Lost;
            return Some(self.outcome);
        };
        self.score = score;

        self.outcome = match self.score.cmp(&self.target) {
            std::cmp::Ordering::Equal => Outcome::Won,
            std::cmp::Ordering::Greater => Outcome::Lost,
            std::cmp::Ordering::Less => return None,
        };
        Some(self.outcome)
    }
}
