//! Countdown display formats.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CountdownStyle {
    /// Bare seconds: `"5"`.
    #[default]
    Seconds,
    /// Minutes and zero-padded seconds: `"0:05"`, `"2:30"`.
    MinutesSeconds,
}

impl CountdownStyle {
    #[must_use]
    pub fn format(self, secs: u32) -> String {
        match self {
            CountdownStyle::Seconds => secs.to_string(),
            CountdownStyle::MinutesSeconds => format!("{}:{:02}", secs / 60, secs % 60),
        }
    }
}
