//! # gem-collector
//!
//! Round engine for a small click-to-score game. Each round deals four gems
//! with hidden, distinct values and a target number; the player clicks gems
//! to add their values and wins by landing exactly on the target. Going over
//! loses. A short countdown follows every round, then the next one is dealt.
//!
//! ## Design Principles
//!
//! 1. **Engine, not UI**: Rendering and input belong to the caller. The
//!    engine exposes snapshots and pushes `GameEvent`s to subscribed
//!    observers.
//!
//! 2. **Explicit state**: The tally, the current round and the countdown are
//!    fields of a `GameEngine`, so any number of independent games can run
//!    side by side.
//!
//! 3. **Deterministic**: Every engine is seeded. Same seed and same inputs,
//!    same game.
//!
//! ## Modules
//!
//! - `core`: RNG, configuration, gems, rounds, tally
//! - `countdown`: Countdown state machine and display styles
//! - `events`: Event type and observer registry
//! - `engine`: `GameEngine` and `RoundSnapshot`
//! - `runtime`: Tokio task that ticks the countdown (feature `runtime`)
//!
//! ```
//! use gem_collector::{GameEngine, GemId, Outcome};
//!
//! let mut engine = GameEngine::with_seed(42);
//! engine.start_round_with(19, &[12, 7, 3, 5]).unwrap();
//! engine.choose(GemId::new(0));
//! let snapshot = engine.choose(GemId::new(1));
//! assert_eq!(snapshot.outcome, Outcome::Won);
//! assert_eq!(snapshot.tally.wins, 1);
//! ```

pub mod core;
pub mod countdown;
pub mod error;
pub mod events;
pub mod engine;
#[cfg(feature = "runtime")]
pub mod runtime;

// Re-export commonly used types
pub use crate::core::{GameConfig, GameRng, GameRngState, Gem, GemId, Gems, Outcome, Round, Tally};

pub use crate::countdown::{Countdown, CountdownStyle, CountdownTick};

pub use crate::error::GameError;

pub use crate::events::{GameEvent, Observers, SubscriptionId};

pub use crate::engine::{GameEngine, RoundSnapshot, TickOutcome};

#[cfg(feature = "runtime")]
pub use crate::runtime::{GameDriver, SharedEngine};
