//! Event notifications and the observer registry.
//!
//! The engine never renders anything. It reports what changed through
//! `GameEvent`s, and the UI layer subscribes to the ones it draws.

pub mod event;
pub mod observers;

pub use event::GameEvent;
pub use observers::{Observers, SubscriptionId};
