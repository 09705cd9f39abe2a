//! Win/loss counters that outlive individual rounds.

use serde::{Deserialize, Serialize};

use super::round::Outcome;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub wins: u64,
    pub losses: u64,
}

impl Tally {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a finished round. `InProgress` is not a result and is ignored.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Won => self.wins += 1,
            Outcome::Lost => self.losses += 1,
            Outcome::InProgress => {}
        }
    }

    /// Rounds counted so far.
    #[must_use]
    pub fn rounds(&self) -> u64 {
        self.wins + self.losses
    }
}
