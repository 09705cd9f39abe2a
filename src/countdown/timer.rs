//! Post-round countdown state machine.
//!
//! The countdown does not own a clock. Something outside calls `tick` once
//! per second: a UI timer callback, a test, or the tokio driver in
//! `runtime`. Each `begin` or `cancel` bumps the generation, which is how a
//! scheduled driver notices that the countdown it was started for is gone.

use serde::{Deserialize, Serialize};

use super::style::CountdownStyle;

/// What a single tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountdownTick {
    /// No countdown was running.
    Idle,
    /// Showed this many seconds and keeps running.
    Running(u32),
    /// Showed zero and stopped; the next round is due.
    Expired,
}

/// Countdown between rounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    remaining: u32,
    active: bool,
    generation: u64,
}

impl Countdown {
    /// An inactive countdown.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds the next tick will show.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Identifies the current schedule. Changes on every begin and cancel.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start counting down from `secs`, replacing any running countdown.
    ///
    /// Returns the generation of the new countdown.
    pub fn begin(&mut self, secs: u32) -> u64 {
        self.cancel();
        self.remaining = secs;
        self.active = true;
        self.generation += 1;
        self.generation
    }

    /// Stop the countdown. Returns `false` if it was not running.
    pub fn cancel(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        self.remaining = 0;
        self.generation += 1;
        true
    }

    /// Advance by one second.
    pub fn tick(&mut self) -> CountdownTick {
        if !self.active {
            return CountdownTick::Idle;
        }

        if self.remaining == 0 {
            self.active = false;
            return CountdownTick::Expired;
        }

        let shown = self.remaining;
        self.remaining -= 1;
        CountdownTick::Running(shown)
    }

    /// Remaining time rendered for display.
    #[must_use]
    pub fn label(&self, style: CountdownStyle) -> String {
        style.format(self.remaining)
    }
}
