//! Tokio driver for the countdown.
//!
//! `GameEngine` is a plain state machine; something has to call `tick` once
//! a second after a round ends. `GameDriver` does that with a spawned task.
//! The engine sits behind one async mutex, so UI calls and timer ticks are
//! applied one at a time in arrival order.
//!
//! Each countdown gets its own task, tagged with the countdown generation it
//! was scheduled for. Scheduling a new task aborts the old one, and a task
//! that wakes to find a different generation (someone dealt a round through
//! the shared handle) exits without ticking.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::{debug, trace};

use crate::core::GemId;
use crate::engine::{GameEngine, RoundSnapshot, TickOutcome};
use crate::error::GameError;

/// Engine handle shared between the UI and the countdown task.
pub type SharedEngine = Arc<Mutex<GameEngine>>;

/// Owns the shared engine and its countdown task.
pub struct GameDriver {
    engine: SharedEngine,
    period: Duration,
    ticker: Option<(u64, JoinHandle<()>)>,
}

impl GameDriver {
    /// Wrap an engine. Must be used from inside a tokio runtime.
    pub fn new(engine: GameEngine) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            period: Duration::from_secs(1),
            ticker: None,
        }
    }

    /// Override the one-second tick period.
    #[must_use]
    pub fn with_tick_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// Shared handle, for subscribing observers or reading state.
    pub fn engine(&self) -> SharedEngine {
        Arc::clone(&self.engine)
    }

    /// Generation of the countdown currently being driven, if any.
    pub fn scheduled_generation(&self) -> Option<u64> {
        self.ticker
            .as_ref()
            .filter(|(_, handle)| !handle.is_finished())
            .map(|(generation, _)| *generation)
    }

    pub async fn snapshot(&self) -> RoundSnapshot {
        self.engine.lock().await.snapshot()
    }

    /// Deal a random round, stopping any countdown task.
    pub async fn start_round(&mut self) -> RoundSnapshot {
        let snapshot = self.engine.lock().await.start_round();
        self.stop_ticker();
        snapshot
    }

    /// Deal a round with chosen numbers, stopping any countdown task.
    pub async fn start_round_with(&mut self, target: u32, values: &[u32]) -> Result<RoundSnapshot, GameError> {
        let snapshot = self.engine.lock().await.start_round_with(target, values)?;
        self.stop_ticker();
        Ok(snapshot)
    }

    /// Register a click; schedules the countdown if the round just ended.
    pub async fn choose(&mut self, gem: GemId) -> RoundSnapshot {
        let (snapshot, pending) = {
            let mut engine = self.engine.lock().await;
            let snapshot = engine.choose(gem);
            let countdown = engine.countdown();
            (snapshot, countdown.is_active().then(|| countdown.generation()))
        };

        if let Some(generation) = pending {
            if self.scheduled_generation() != Some(generation) {
                self.schedule(generation);
            }
        }
        snapshot
    }

    fn schedule(&mut self, generation: u64) {
        self.stop_ticker();
        debug!(generation, period = ?self.period, "scheduling countdown task");
        let handle = tokio::spawn(run_countdown(self.engine(), generation, self.period));
        self.ticker = Some((generation, handle));
    }

    fn stop_ticker(&mut self) {
        if let Some((generation, handle)) = self.ticker.take() {
            if !handle.is_finished() {
                debug!(generation, "aborting countdown task");
            }
            handle.abort();
        }
    }
}

impl Drop for GameDriver {
    fn drop(&mut self) {
        self.stop_ticker();
    }
}

async fn run_countdown(engine: SharedEngine, generation: u64, period: Duration) {
    let mut interval = interval_at(Instant::now() + period, period);

    loop {
        interval.tick().await;

        let mut engine = engine.lock().await;
        let countdown = engine.countdown();
        if !countdown.is_active() || countdown.generation() != generation {
            trace!(generation, "countdown task is stale, exiting");
            return;
        }

        match engine.tick() {
            TickOutcome::Restarted(snapshot) => {
                debug!(generation, round = snapshot.round, "countdown finished, round restarted");
                return;
            }
            TickOutcome::Counting(_) => {}
            TickOutcome::Idle => return,
        }
    }
}
