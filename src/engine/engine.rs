//! The round manager.
//!
//! `GameEngine` owns everything that changes while the game runs: the
//! current round, the tally, the countdown and the subscribed observers.
//! All mutation goes through `&mut self`, so a single owner (or a single
//! lock, see `runtime`) serializes choices and timer ticks.

use tracing::{debug, info, trace};

use crate::core::{GameConfig, GameRng, GameRngState, Gem, GemId, Outcome, Round, Tally};
use crate::countdown::{Countdown, CountdownTick};
use crate::error::GameError;
use crate::events::{GameEvent, Observers, SubscriptionId};

use super::snapshot::RoundSnapshot;

/// Result of one countdown tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// No countdown was running; nothing happened.
    Idle,
    /// The countdown showed this many seconds.
    Counting(u32),
    /// The countdown ran out and a new round was dealt.
    Restarted(RoundSnapshot),
}

/// Finite-state round manager.
#[derive(Debug)]
pub struct GameEngine {
    config: GameConfig,
    rng: GameRng,
    round: Option<Round>,
    tally: Tally,
    countdown: Countdown,
    observers: Observers,
}

impl GameEngine {
    /// Create an engine with a validated config. No round is dealt until
    /// `start_round` is called.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self::build(config, seed))
    }

    /// Create an engine for the reference game.
    pub fn with_seed(seed: u64) -> Self {
        Self::build(GameConfig::default(), seed)
    }

    fn build(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: GameRng::new(seed),
            round: None,
            tally: Tally::new(),
            countdown: Countdown::new(),
            observers: Observers::new(),
        }
    }

    // === Accessors ===

    /// Configuration this engine was built with.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The current round, if one has been dealt.
    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    /// Gems of the current round, empty before the first deal.
    pub fn gems(&self) -> &[Gem] {
        self.round.as_ref().map(|r| r.gems.as_slice()).unwrap_or(&[])
    }

    /// Wins and losses so far.
    pub fn tally(&self) -> Tally {
        self.tally
    }

    /// Countdown between rounds.
    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    /// Checkpoint of the RNG, enough to reproduce every future deal.
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Current visible state.
    pub fn snapshot(&self) -> RoundSnapshot {
        let mut snapshot = match &self.round {
            Some(round) => RoundSnapshot::from_round(round, self.tally),
            None => RoundSnapshot::undealt(self.tally),
        };
        if self.countdown.is_active() {
            snapshot.countdown = Some(self.countdown.remaining());
            snapshot.countdown_label = Some(self.countdown.label(self.config.countdown_style));
        }
        snapshot
    }

    // === Observers ===

    /// Subscribe to countdown ticks.
    pub fn on_tick(&mut self, f: impl FnMut(u32) + Send + 'static) -> SubscriptionId {
        self.observers.on_tick(f)
    }

    /// Subscribe to new deals.
    pub fn on_round_start(&mut self, f: impl FnMut(&RoundSnapshot) + Send + 'static) -> SubscriptionId {
        self.observers.on_round_start(f)
    }

    /// Subscribe to wins and losses.
    pub fn on_outcome(&mut self, f: impl FnMut(Outcome, Tally) + Send + 'static) -> SubscriptionId {
        self.observers.on_outcome(f)
    }

    /// Subscribe to every event.
    pub fn on_event(&mut self, f: impl FnMut(&GameEvent) + Send + 'static) -> SubscriptionId {
        self.observers.on_event(f)
    }

    /// Remove a subscription. Returns `false` if the ID was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn emit(&mut self, event: GameEvent) {
        trace!(kind = event.kind(), "dispatching event");
        self.observers.dispatch(&event);
    }

    // === Rounds ===

    /// Deal a fresh round with random gems and target.
    ///
    /// Cancels any running countdown first.
    pub fn start_round(&mut self) -> RoundSnapshot {
        let values = self
            .rng
            .draw_distinct(self.config.gem_values.clone(), self.config.gem_count);
        let target = self.rng.gen_range(self.config.target_range.clone());
        self.deal(target, &values)
    }

    /// Deal a round with caller-chosen numbers.
    ///
    /// The numbers must satisfy the same rules as a random deal. Side
    /// effects match `start_round`.
    pub fn start_round_with(&mut self, target: u32, values: &[u32]) -> Result<RoundSnapshot, GameError> {
        Round::validate_setup(&self.config, target, values)?;
        Ok(self.deal(target, values))
    }

    fn deal(&mut self, target: u32, values: &[u32]) -> RoundSnapshot {
        if self.countdown.cancel() {
            debug!(generation = self.countdown.generation(), "countdown cancelled by new round");
        }

        let number = self.round.as_ref().map_or(1, |r| r.number + 1);
        self.round = Some(Round::new(number, target, values));
        debug!(round = number, target, ?values, "round started");

        let snapshot = self.snapshot();
        self.emit(GameEvent::RoundStarted(snapshot.clone()));
        snapshot
    }

    /// Register a click on a gem.
    ///
    /// Ignored when no round is open or `gem` is not one of its slots.
    pub fn choose(&mut self, gem: GemId) -> RoundSnapshot {
        let Some(round) = self.round.as_mut() else {
            trace!(%gem, "choice before first round ignored");
            return self.snapshot();
        };

        let choices = round.choices;
        let ended = round.choose(gem);
        let (number, score, target) = (round.number, round.score, round.target);

        if round.choices == choices {
            trace!(%gem, round = number, outcome = %round.outcome, "choice ignored");
            return self.snapshot();
        }
        trace!(%gem, round = number, score, target, "gem chosen");

        if let Some(outcome) = ended {
            self.tally.record(outcome);
            info!(
                round = number,
                %outcome,
                score,
                target,
                wins = self.tally.wins,
                losses = self.tally.losses,
                "round ended"
            );

            let generation = self.countdown.begin(self.config.countdown_secs);
            debug!(generation, secs = self.config.countdown_secs, "countdown started");

            let tally = self.tally;
            self.emit(GameEvent::RoundEnded { outcome, tally });
        }

        self.snapshot()
    }

    // === Countdown ===

    /// Advance the countdown by one second.
    ///
    /// Emits the shown value to tick observers; the tick that shows zero
    /// also deals the next round.
    pub fn tick(&mut self) -> TickOutcome {
        match self.countdown.tick() {
            CountdownTick::Idle => TickOutcome::Idle,
            CountdownTick::Running(secs) => {
                trace!(secs, "countdown tick");
                self.emit(GameEvent::Tick(secs));
                TickOutcome::Counting(secs)
            }
            CountdownTick::Expired => {
                trace!(secs = 0, "countdown tick");
                self.emit(GameEvent::Tick(0));
                TickOutcome::Restarted(self.start_round())
            }
        }
    }

    /// Stop a running countdown without dealing. Returns `false` if none
    /// was running.
    pub fn cancel_countdown(&mut self) -> bool {
        let cancelled = self.countdown.cancel();
        if cancelled {
            debug!(generation = self.countdown.generation(), "countdown cancelled");
        }
        cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn engine_with(target: u32, values: &[u32]) -> GameEngine {
        let mut engine = GameEngine::with_seed(42);
        engine.start_round_with(target, values).unwrap();
        engine
    }

    #[test]
    fn test_new_validates_config() {
        assert!(GameEngine::new(GameConfig::new().with_gem_count(20), 1).is_err());
        assert!(GameEngine::new(GameConfig::new(), 1).is_ok());
    }

    #[test]
    fn test_new_rejects_wide_configs() {
        let overflow = GameConfig::new()
            .with_gem_count(1)
            .with_gem_values(3_000_000_000..=3_000_000_000)
            .with_target_range(4_000_000_000..=4_000_000_000);
        assert!(GameEngine::new(overflow, 1).is_err());

        let too_many = GameConfig::new().with_gem_count(300).with_gem_values(1..=1000);
        assert!(GameEngine::new(too_many, 1).is_err());
    }

    #[test]
    fn test_max_gem_count_has_distinct_ids() {
        let config = GameConfig::new().with_gem_count(256).with_gem_values(1..=1000);
        let mut engine = GameEngine::new(config, 9).unwrap();
        let snapshot = engine.start_round();

        let ids: std::collections::HashSet<_> = snapshot.gems.iter().map(|g| g.id).collect();
        assert_eq!(ids.len(), 256);
    }

    #[test]
    fn test_undealt_engine() {
        let mut engine = GameEngine::with_seed(1);
        assert!(engine.round().is_none());
        assert!(engine.gems().is_empty());

        let snapshot = engine.choose(GemId(0));
        assert_eq!(snapshot.round, 0);
        assert_eq!(snapshot.score, 0);
        assert_eq!(engine.tick(), TickOutcome::Idle);
    }

    #[test]
    fn test_start_round_deals_valid_numbers() {
        let mut engine = GameEngine::with_seed(7);
        for expected_round in 1..=50 {
            let snapshot = engine.start_round();
            assert_eq!(snapshot.round, expected_round);
            assert_eq!(snapshot.gems.len(), 4);
            assert!((19..=120).contains(&snapshot.target));
            assert_eq!(snapshot.score, 0);
            assert_eq!(snapshot.outcome, Outcome::InProgress);
        }
    }

    #[test]
    fn test_same_seed_same_rounds() {
        let mut a = GameEngine::with_seed(99);
        let mut b = GameEngine::with_seed(99);
        for _ in 0..10 {
            assert_eq!(a.start_round(), b.start_round());
        }
    }

    #[test]
    fn test_rng_state_replays_deals() {
        let mut engine = GameEngine::with_seed(5);
        engine.start_round();
        let state = engine.rng_state();
        let next = engine.start_round();

        let mut rng = GameRng::from_state(&state);
        let values = rng.draw_distinct(1..=12, 4);
        let target = rng.gen_range(19..=120);
        assert_eq!(next.target, target);
        assert_eq!(next.gems.iter().map(|g| g.value).collect::<Vec<_>>(), values.into_vec());
    }

    #[test]
    fn test_win_path() {
        let mut engine = engine_with(19, &[12, 7, 3, 5]);

        let snapshot = engine.choose(GemId(0));
        assert_eq!(snapshot.score, 12);
        assert_eq!(snapshot.outcome, Outcome::InProgress);
        assert_eq!(snapshot.countdown, None);

        let snapshot = engine.choose(GemId(1));
        assert_eq!(snapshot.score, 19);
        assert_eq!(snapshot.outcome, Outcome::Won);
        assert_eq!(snapshot.tally, Tally { wins: 1, losses: 0 });
        assert_eq!(snapshot.countdown, Some(5));
        assert_eq!(snapshot.countdown_label.as_deref(), Some("5"));
    }

    #[test]
    fn test_loss_path() {
        let mut engine = engine_with(19, &[12, 10, 3, 5]);
        engine.choose(GemId(0));
        let snapshot = engine.choose(GemId(1));

        assert_eq!(snapshot.score, 22);
        assert_eq!(snapshot.outcome, Outcome::Lost);
        assert_eq!(snapshot.tally, Tally { wins: 0, losses: 1 });
        assert!(engine.countdown().is_active());
    }

    #[test]
    fn test_choices_after_outcome_ignored() {
        let mut engine = engine_with(19, &[12, 7, 3, 5]);
        engine.choose(GemId(0));
        let ended = engine.choose(GemId(1));

        for id in 0..4 {
            assert_eq!(engine.choose(GemId(id)), ended);
        }
        assert_eq!(engine.tally(), Tally { wins: 1, losses: 0 });
    }

    #[test]
    fn test_unknown_gem_ignored() {
        let mut engine = engine_with(40, &[12, 7, 3, 5]);
        engine.choose(GemId(2));
        let before = engine.snapshot();
        assert_eq!(engine.choose(GemId(4)), before);
        assert_eq!(engine.choose(GemId(200)), before);
    }

    #[test]
    fn test_countdown_restarts_once() {
        let mut engine = engine_with(19, &[12, 7, 3, 5]);
        engine.choose(GemId(0));
        engine.choose(GemId(1));

        for secs in (1..=5).rev() {
            assert_eq!(engine.tick(), TickOutcome::Counting(secs));
        }
        match engine.tick() {
            TickOutcome::Restarted(snapshot) => {
                assert_eq!(snapshot.round, 2);
                assert_eq!(snapshot.outcome, Outcome::InProgress);
                assert_eq!(snapshot.tally, Tally { wins: 1, losses: 0 });
            }
            other => panic!("expected restart, got {:?}", other),
        }
        assert_eq!(engine.tick(), TickOutcome::Idle);
        assert_eq!(engine.round().map(|r| r.number), Some(2));
    }

    #[test]
    fn test_manual_restart_cancels_countdown() {
        let mut engine = engine_with(19, &[12, 7, 3, 5]);
        engine.choose(GemId(0));
        engine.choose(GemId(1));
        engine.tick();

        let snapshot = engine.start_round();
        assert_eq!(snapshot.round, 2);
        assert_eq!(snapshot.countdown, None);

        for _ in 0..10 {
            assert_eq!(engine.tick(), TickOutcome::Idle);
        }
        assert_eq!(engine.round().map(|r| r.number), Some(2));
    }

    #[test]
    fn test_cancel_countdown() {
        let mut engine = engine_with(19, &[12, 7, 3, 5]);
        assert!(!engine.cancel_countdown());

        engine.choose(GemId(0));
        engine.choose(GemId(1));
        assert!(engine.cancel_countdown());
        assert_eq!(engine.tick(), TickOutcome::Idle);
        assert_eq!(engine.snapshot().outcome, Outcome::Won);
    }

    #[test]
    fn test_start_round_with_rejects_bad_setup() {
        let mut engine = GameEngine::with_seed(1);
        assert_eq!(
            engine.start_round_with(19, &[1, 1, 2, 3]),
            Err(GameError::DuplicateGemValue(1))
        );
        assert!(engine.round().is_none());
    }

    #[test]
    fn test_observers_fire() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let mut engine = GameEngine::new(GameConfig::new().with_countdown_secs(1), 3).unwrap();
        {
            let events = Arc::clone(&events);
            engine.on_event(move |e| events.lock().unwrap().push(e.kind()));
        }

        engine.start_round_with(19, &[12, 7, 3, 5]).unwrap();
        engine.choose(GemId(0));
        engine.choose(GemId(1));
        engine.tick();
        engine.tick();

        assert_eq!(
            *events.lock().unwrap(),
            vec!["round_started", "round_ended", "tick", "tick", "round_started"]
        );
    }

    #[test]
    fn test_minutes_label() {
        let config = GameConfig::new()
            .with_countdown_secs(90)
            .with_countdown_style(crate::countdown::CountdownStyle::MinutesSeconds);
        let mut engine = GameEngine::new(config, 1).unwrap();
        engine.start_round_with(19, &[12, 7, 3, 5]).unwrap();
        engine.choose(GemId(0));
        let snapshot = engine.choose(GemId(1));
        assert_eq!(snapshot.countdown_label.as_deref(), Some("1:30"));
    }
}
