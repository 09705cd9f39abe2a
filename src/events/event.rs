//! Notifications the engine sends to the UI layer.

use serde::{Deserialize, Serialize};

use crate::core::{Outcome, Tally};
use crate::engine::RoundSnapshot;

/// Something the UI may want to redraw for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A round was dealt (at launch, after a countdown, or on request).
    RoundStarted(RoundSnapshot),
    /// The countdown shows this many seconds.
    Tick(u32),
    /// A round ended; carries the tally including that round.
    RoundEnded { outcome: Outcome, tally: Tally },
}

impl GameEvent {
    /// Short name for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            GameEvent::RoundStarted(_) => "round_started",
            GameEvent::Tick(_) => "tick",
            GameEvent::RoundEnded { .. } => "round_ended",
        }
    }
}
