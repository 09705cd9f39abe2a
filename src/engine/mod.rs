//! Game engine: rounds, scoring, tally and the countdown between rounds.

#[allow(clippy::module_inception)]
pub mod engine;
pub mod snapshot;

pub use engine::{GameEngine, TickOutcome};
pub use snapshot::RoundSnapshot;
