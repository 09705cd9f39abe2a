//! Error type for engine construction and scripted round setup.
//!
//! Gameplay itself never fails: stale or unknown choices are ignored.
//! Errors only surface when a caller hands the engine numbers it cannot
//! honour.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid game config: {0}")]
    InvalidConfig(String),

    #[error("expected {expected} gems, got {actual}")]
    GemCount { expected: usize, actual: usize },

    #[error("gem value {0} appears more than once")]
    DuplicateGemValue(u32),

    #[error("gem value {value} is outside {min}..={max}")]
    GemValueOutOfRange { value: u32, min: u32, max: u32 },

    #[error("target {target} is outside {min}..={max}")]
    TargetOutOfRange { target: u32, min: u32, max: u32 },
}
