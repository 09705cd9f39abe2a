//! Countdown between rounds and how it is displayed.

pub mod style;
pub mod timer;

pub use style::CountdownStyle;
pub use timer::{Countdown, CountdownTick};
