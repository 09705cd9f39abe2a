//! What the UI needs to draw the game at one instant.

use serde::{Deserialize, Serialize};

use crate::core::{Gem, GemId, Gems, Outcome, Round, Tally};

/// Copy of the engine's visible state.
///
/// Round number 0 means no round has been dealt yet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub round: u64,
    pub target: u32,
    pub score: u32,
    pub outcome: Outcome,
    pub gems: Gems,
    pub tally: Tally,
    /// Seconds the countdown will show next, while one is running.
    pub countdown: Option<u32>,
    /// `countdown` rendered in the configured style.
    pub countdown_label: Option<String>,
}

impl RoundSnapshot {
    pub(crate) fn undealt(tally: Tally) -> Self {
        Self {
            round: 0,
            target: 0,
            score: 0,
            outcome: Outcome::InProgress,
            gems: Gems::new(),
            tally,
            countdown: None,
            countdown_label: None,
        }
    }

    pub(crate) fn from_round(round: &Round, tally: Tally) -> Self {
        Self {
            round: round.number,
            target: round.target,
            score: round.score,
            outcome: round.outcome,
            gems: round.gems.clone(),
            tally,
            countdown: None,
            countdown_label: None,
        }
    }

    /// Look up a gem by slot.
    #[must_use]
    pub fn gem(&self, id: GemId) -> Option<&Gem> {
        self.gems.iter().find(|g| g.id == id)
    }

    /// Points still needed to hit the target.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.target.saturating_sub(self.score)
    }
}
