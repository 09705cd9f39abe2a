//! Observer registry.
//!
//! The UI subscribes closures for the notifications it renders. Listeners
//! are called in subscription order, synchronously, from inside the engine
//! call that caused the event.

use serde::{Deserialize, Serialize};

use crate::core::{Outcome, Tally};
use crate::engine::RoundSnapshot;

use super::event::GameEvent;

/// Handle returned by every subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub u32);

impl SubscriptionId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Subscription({})", self.0)
    }
}

enum Listener {
    Tick(Box<dyn FnMut(u32) + Send>),
    RoundStart(Box<dyn FnMut(&RoundSnapshot) + Send>),
    Outcome(Box<dyn FnMut(Outcome, Tally) + Send>),
    Any(Box<dyn FnMut(&GameEvent) + Send>),
}

impl Listener {
    fn notify(&mut self, event: &GameEvent) {
        match (self, event) {
            (Listener::Tick(f), GameEvent::Tick(secs)) => f(*secs),
            (Listener::RoundStart(f), GameEvent::RoundStarted(snapshot)) => f(snapshot),
            (Listener::Outcome(f), GameEvent::RoundEnded { outcome, tally }) => f(*outcome, *tally),
            (Listener::Any(f), event) => f(event),
            _ => {}
        }
    }
}

/// Subscribed listeners, in subscription order.
#[derive(Default)]
pub struct Observers {
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u32,
}

impl Observers {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn add(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Called with the remaining seconds on every countdown tick.
    pub fn on_tick(&mut self, f: impl FnMut(u32) + Send + 'static) -> SubscriptionId {
        self.add(Listener::Tick(Box::new(f)))
    }

    /// Called with the new round whenever one is dealt.
    pub fn on_round_start(&mut self, f: impl FnMut(&RoundSnapshot) + Send + 'static) -> SubscriptionId {
        self.add(Listener::RoundStart(Box::new(f)))
    }

    /// Called once per round when it is won or lost.
    pub fn on_outcome(&mut self, f: impl FnMut(Outcome, Tally) + Send + 'static) -> SubscriptionId {
        self.add(Listener::Outcome(Box::new(f)))
    }

    /// Called for every event.
    pub fn on_event(&mut self, f: impl FnMut(&GameEvent) + Send + 'static) -> SubscriptionId {
        self.add(Listener::Any(Box::new(f)))
    }

    /// Remove a listener. Returns `false` if the ID was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Deliver an event to every interested listener.
    pub fn dispatch(&mut self, event: &GameEvent) {
        for (_, listener) in &mut self.listeners {
            listener.notify(event);
        }
    }

    /// Number of active subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("listeners", &self.listeners.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_routes_by_kind() {
        let ticks = Arc::new(Mutex::new(Vec::new()));
        let outcomes = Arc::new(Mutex::new(Vec::new()));
        let all = Arc::new(Mutex::new(0));

        let mut observers = Observers::new();
        {
            let ticks = Arc::clone(&ticks);
            observers.on_tick(move |secs| ticks.lock().unwrap().push(secs));
        }
        {
            let outcomes = Arc::clone(&outcomes);
            observers.on_outcome(move |outcome, tally| outcomes.lock().unwrap().push((outcome, tally)));
        }
        {
            let all = Arc::clone(&all);
            observers.on_event(move |_| *all.lock().unwrap() += 1);
        }

        observers.dispatch(&GameEvent::Tick(4));
        observers.dispatch(&GameEvent::Tick(3));
        observers.dispatch(&GameEvent::RoundEnded {
            outcome: Outcome::Won,
            tally: Tally { wins: 1, losses: 0 },
        });

        assert_eq!(*ticks.lock().unwrap(), vec![4, 3]);
        assert_eq!(
            *outcomes.lock().unwrap(),
            vec![(Outcome::Won, Tally { wins: 1, losses: 0 })]
        );
        assert_eq!(*all.lock().unwrap(), 3);
    }

    #[test]
    fn test_unsubscribe() {
        let count = Arc::new(Mutex::new(0));
        let mut observers = Observers::new();

        let id = {
            let count = Arc::clone(&count);
            observers.on_tick(move |_| *count.lock().unwrap() += 1)
        };
        assert_eq!(observers.len(), 1);

        observers.dispatch(&GameEvent::Tick(1));
        assert!(observers.unsubscribe(id));
        assert!(!observers.unsubscribe(id));
        observers.dispatch(&GameEvent::Tick(0));

        assert_eq!(*count.lock().unwrap(), 1);
        assert!(observers.is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let mut observers = Observers::new();
        let a = observers.on_tick(|_| {});
        let b = observers.on_tick(|_| {});
        observers.unsubscribe(a);
        let c = observers.on_tick(|_| {});

        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
    }
}
