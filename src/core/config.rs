//! Game configuration.
//!
//! `GameConfig::default()` is the reference game: four gems worth 1-12,
//! a target between 19 and 120 and a five second countdown between rounds.
//! Front ends tweak it through the `with_*` builders and the engine
//! validates it once at construction.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::countdown::CountdownStyle;
use crate::error::GameError;

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of gems dealt each round.
    pub gem_count: usize,

    /// Inclusive range gem values are drawn from.
    pub gem_values: RangeInclusive<u32>,

    /// Inclusive range the target number is drawn from.
    pub target_range: RangeInclusive<u32>,

    /// Seconds shown by the countdown after a round ends.
    pub countdown_secs: u32,

    /// How the countdown renders its remaining time.
    pub countdown_style: CountdownStyle,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            gem_count: 4,
            gem_values: 1..=12,
            target_range: 19..=120,
            countdown_secs: 5,
            countdown_style: CountdownStyle::Seconds,
        }
    }
}

impl GameConfig {
    /// Create the reference configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of gems per round.
    #[must_use]
    pub fn with_gem_count(mut self, count: usize) -> Self {
        self.gem_count = count;
        self
    }

    /// Set the range gem values are drawn from.
    #[must_use]
    pub fn with_gem_values(mut self, values: RangeInclusive<u32>) -> Self {
        self.gem_values = values;
        self
    }

    /// Set the range targets are drawn from.
    #[must_use]
    pub fn with_target_range(mut self, range: RangeInclusive<u32>) -> Self {
        self.target_range = range;
        self
    }

    /// Set the countdown length in seconds.
    #[must_use]
    pub fn with_countdown_secs(mut self, secs: u32) -> Self {
        self.countdown_secs = secs;
        self
    }

    /// Set how the countdown is rendered.
    #[must_use]
    pub fn with_countdown_style(mut self, style: CountdownStyle) -> Self {
        self.countdown_style = style;
        self
    }

    /// Number of distinct values a gem can take.
    #[must_use]
    pub fn gem_value_span(&self) -> usize {
        if self.gem_values.is_empty() {
            0
        } else {
            (self.gem_values.end() - self.gem_values.start()) as usize + 1
        }
    }

    /// Check that rounds can always be generated from this config.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.gem_count == 0 {
            return Err(GameError::InvalidConfig("gem count must be at least 1".into()));
        }
        if self.gem_values.is_empty() {
            return Err(GameError::InvalidConfig(format!(
                "gem value range {:?} is empty",
                self.gem_values
            )));
        }
        if *self.gem_values.start() == 0 {
            return Err(GameError::InvalidConfig("gem values must be positive".into()));
        }
        if self.gem_count > usize::from(u8::MAX) + 1 {
            return Err(GameError::InvalidConfig(format!(
                "{} gems exceed the {} available slots",
                self.gem_count,
                usize::from(u8::MAX) + 1
            )));
        }
        if self.gem_count > self.gem_value_span() {
            return Err(GameError::InvalidConfig(format!(
                "{} distinct gems do not fit in {:?}",
                self.gem_count, self.gem_values
            )));
        }
        if self.target_range.is_empty() {
            return Err(GameError::InvalidConfig(format!(
                "target range {:?} is empty",
                self.target_range
            )));
        }
        if self.target_range.end().checked_add(*self.gem_values.end()).is_none() {
            return Err(GameError::InvalidConfig(format!(
                "scores past target {} with gems up to {} overflow u32",
                self.target_range.end(),
                self.gem_values.end()
            )));
        }
        Ok(())
    }
}
