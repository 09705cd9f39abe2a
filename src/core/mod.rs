//! Core game types: RNG, configuration, gems, rounds and the tally.
//!
//! Nothing in here knows about time or observers; the engine layers the
//! countdown and notifications on top.

pub mod rng;
pub mod config;
pub mod gem;
pub mod round;
pub mod tally;

pub use rng::{GameRng, GameRngState};
pub use config::GameConfig;
pub use gem::{Gem, GemId};
pub use round::{Gems, Outcome, Round};
pub use tally::Tally;
