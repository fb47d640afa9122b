use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::{
    catalog::{Card, ImageRef, CARDS},
    prompts::Prompts,
};
use crate::{
    config::GameConfig,
    error::{GameError, GameResult},
};

const MILLIS_PER_SECOND: u64 = 1_000;

/// Where a round is in its life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Running,
    Finished,
}

/// One-shot cue for the presentation layer; stays set until acknowledged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    None,
    Correct,
    Panic,
    GameOver,
}

/// Result of a single countdown tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Tick arrived while the round was not running
    Ignored,
    Counting { remaining_ms: u64 },
    Expired,
}

/// Everything the presentation layer displays, detached from the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub phase: Phase,
    pub word: String,
    pub image: ImageRef,
    pub score: i32,
    pub remaining_ms: u64,
    pub feedback: Feedback,
    pub finished: bool,
}

impl RoundSnapshot {
    /// Whole seconds left, rounded down
    pub fn remaining_secs(&self) -> u64 {
        self.remaining_ms / MILLIS_PER_SECOND
    }
}

/// Final tally of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundTally {
    pub score: i32,
    pub corrects: u32,
    pub skips: u32,
}

/// The countdown, score and prompt queues of a single round.
///
/// All transitions are plain state mutation; time is fed in from outside
/// through [`RoundEngine::tick`].
#[derive(Debug)]
pub struct RoundEngine {
    config: GameConfig,
    prompts: Prompts,
    rng: StdRng,
    phase: Phase,
    remaining_ms: u64,
    score: i32,
    corrects: u32,
    skips: u32,
    finished: bool,
    pending_feedback: Feedback,
}

impl RoundEngine {
    /// Create an idle engine over the built-in card set
    pub fn new(config: GameConfig) -> GameResult<Self> {
        Self::with_cards(config, &CARDS, StdRng::from_os_rng())
    }

    /// Create an idle engine over a custom card set and random source
    pub fn with_cards(config: GameConfig, cards: &[Card], mut rng: StdRng) -> GameResult<Self> {
        config.validate()?;
        let prompts = Prompts::new(config.cycling, cards, &mut rng)?;

        Ok(Self {
            remaining_ms: config.round_duration_ms,
            config,
            prompts,
            rng,
            phase: Phase::Idle,
            score: 0,
            corrects: 0,
            skips: 0,
            finished: false,
            pending_feedback: Feedback::None,
        })
    }

    /// Deal fresh prompts, zero the score and arm the countdown
    pub fn start(&mut self) -> GameResult<()> {
        if self.phase != Phase::Idle {
            return Err(GameError::AlreadyStarted);
        }

        self.prompts.reset(&mut self.rng);
        self.score = 0;
        self.corrects = 0;
        self.skips = 0;
        self.finished = false;
        self.pending_feedback = Feedback::None;
        self.remaining_ms = self.config.round_duration_ms;
        self.phase = Phase::Running;

        tracing::debug!(
            "Round started: {} ms in {} ms ticks, first word '{}'",
            self.remaining_ms,
            self.config.tick_interval_ms,
            self.prompts.current_word()
        );
        Ok(())
    }

    /// The player guessed the word
    pub fn on_correct(&mut self) {
        if !self.accepts_input("correct") {
            return;
        }
        self.score += 1;
        self.corrects += 1;
        self.pending_feedback = Feedback::Correct;
        self.prompts.advance(&mut self.rng);
    }

    /// The player passed on the word
    pub fn on_skip(&mut self) {
        if !self.accepts_input("skip") {
            return;
        }
        self.score -= 1;
        self.skips += 1;
        self.prompts.advance(&mut self.rng);
    }

    /// Advance the countdown by one tick interval
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != Phase::Running {
            tracing::debug!("Ignoring tick while {:?}", self.phase);
            return TickOutcome::Ignored;
        }

        self.remaining_ms = self
            .remaining_ms
            .saturating_sub(self.config.tick_interval_ms);

        if self.remaining_ms == 0 {
            self.on_timeout();
            return TickOutcome::Expired;
        }

        if self.remaining_ms / MILLIS_PER_SECOND <= self.config.panic_threshold_secs {
            self.pending_feedback = Feedback::Panic;
        }

        TickOutcome::Counting {
            remaining_ms: self.remaining_ms,
        }
    }

    /// Time is up. Only the first call of a running round has any effect.
    pub fn on_timeout(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        self.remaining_ms = 0;
        self.pending_feedback = Feedback::GameOver;
        self.finished = true;
        self.phase = Phase::Finished;

        tracing::debug!(
            "Round over with score {} ({} correct, {} skipped)",
            self.score,
            self.corrects,
            self.skips
        );
    }

    /// The cue has been delivered
    pub fn acknowledge_feedback(&mut self) {
        self.pending_feedback = Feedback::None;
    }

    /// The caller has navigated away from the finished round
    pub fn acknowledge_finish(&mut self) {
        self.finished = false;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn current_word(&self) -> &str {
        self.prompts.current_word()
    }

    pub fn current_image(&self) -> &ImageRef {
        self.prompts.current_image()
    }

    pub fn pending_feedback(&self) -> Feedback {
        self.pending_feedback
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            phase: self.phase,
            word: self.current_word().to_string(),
            image: self.current_image().clone(),
            score: self.score,
            remaining_ms: self.remaining_ms,
            feedback: self.pending_feedback,
            finished: self.finished,
        }
    }

    pub fn tally(&self) -> RoundTally {
        RoundTally {
            score: self.score,
            corrects: self.corrects,
            skips: self.skips,
        }
    }

    fn accepts_input(&self, action: &str) -> bool {
        if self.phase == Phase::Running {
            return true;
        }
        tracing::debug!("Ignoring {} while {:?}", action, self.phase);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CyclingMode;

    fn engine_with(config: GameConfig) -> RoundEngine {
        RoundEngine::with_cards(config, &CARDS, StdRng::seed_from_u64(2024)).unwrap()
    }

    fn started() -> RoundEngine {
        let mut engine = engine_with(GameConfig::default());
        engine.start().unwrap();
        engine
    }

    #[test]
    fn test_new_engine_is_idle() {
        let engine = engine_with(GameConfig::default());
        assert_eq!(engine.phase(), Phase::Idle);
        assert_eq!(engine.remaining_ms(), 10_000);
        assert_eq!(engine.pending_feedback(), Feedback::None);
        assert!(!engine.is_finished());
    }

    #[test]
    fn test_start_arms_round() {
        let engine = started();
        assert_eq!(engine.phase(), Phase::Running);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.remaining_ms(), 10_000);
        assert!(CARDS.iter().any(|card| card.word == engine.current_word()));
    }

    #[test]
    fn test_start_twice_is_rejected() {
        let mut engine = started();
        assert_eq!(engine.start(), Err(GameError::AlreadyStarted));
    }

    #[test]
    fn test_three_corrects_and_a_skip_score_two() {
        let mut engine = started();
        engine.on_correct();
        engine.on_correct();
        engine.on_correct();
        engine.on_skip();
        assert_eq!(engine.score(), 2);
        assert_eq!(
            engine.tally(),
            RoundTally {
                score: 2,
                corrects: 3,
                skips: 1
            }
        );
    }

    #[test]
    fn test_score_has_no_floor() {
        let mut engine = started();
        for _ in 0..7 {
            engine.on_skip();
        }
        assert_eq!(engine.score(), -7);
    }

    #[test]
    fn test_score_tracks_mixed_sequence() {
        let mut engine = started();
        let actions = [true, false, false, true, true, false, true, true, false, false, false];
        let mut expected = 0;
        for correct in actions {
            if correct {
                engine.on_correct();
                expected += 1;
            } else {
                engine.on_skip();
                expected -= 1;
            }
            assert_eq!(engine.score(), expected);
        }
    }

    #[test]
    fn test_correct_sets_feedback_but_skip_does_not() {
        let mut engine = started();
        engine.on_skip();
        assert_eq!(engine.pending_feedback(), Feedback::None);
        engine.on_correct();
        assert_eq!(engine.pending_feedback(), Feedback::Correct);
    }

    #[test]
    fn test_actions_advance_prompt() {
        let mut engine = started();
        let mut words = vec![engine.current_word().to_string()];
        for _ in 0..4 {
            engine.on_correct();
            words.push(engine.current_word().to_string());
        }
        words.sort();
        words.dedup();
        assert_eq!(words.len(), CARDS.len());
    }

    #[test]
    fn test_tick_decrements_by_interval() {
        let mut engine = started();
        let mut previous = engine.remaining_ms();
        for _ in 0..9 {
            let outcome = engine.tick();
            assert_eq!(engine.remaining_ms(), previous - 1_000);
            assert_eq!(
                outcome,
                TickOutcome::Counting {
                    remaining_ms: engine.remaining_ms()
                }
            );
            previous = engine.remaining_ms();
        }
        assert_eq!(engine.remaining_ms(), 1_000);
    }

    #[test]
    fn test_every_tick_panics_when_round_fits_threshold() {
        let mut engine = started();
        for _ in 0..9 {
            engine.tick();
            assert_eq!(engine.pending_feedback(), Feedback::Panic);
            engine.acknowledge_feedback();
        }
        assert_eq!(engine.tick(), TickOutcome::Expired);
        assert_eq!(engine.pending_feedback(), Feedback::GameOver);
    }

    #[test]
    fn test_panic_only_inside_threshold() {
        let mut engine = engine_with(GameConfig {
            panic_threshold_secs: 3,
            ..GameConfig::default()
        });
        engine.start().unwrap();

        for _ in 0..6 {
            engine.tick();
            assert_eq!(engine.pending_feedback(), Feedback::None);
        }
        // 3 s left
        engine.tick();
        assert_eq!(engine.pending_feedback(), Feedback::Panic);
    }

    #[test]
    fn test_finished_exactly_once() {
        let mut engine = started();
        for _ in 0..9 {
            engine.tick();
            assert!(!engine.is_finished());
        }
        assert_eq!(engine.tick(), TickOutcome::Expired);
        assert!(engine.is_finished());
        assert_eq!(engine.phase(), Phase::Finished);

        engine.acknowledge_finish();
        assert!(!engine.is_finished());

        // Late ticks and timeouts do not re-finish the round
        assert_eq!(engine.tick(), TickOutcome::Ignored);
        engine.on_timeout();
        assert!(!engine.is_finished());
        assert_eq!(engine.remaining_ms(), 0);
    }

    #[test]
    fn test_remaining_never_below_zero() {
        let mut engine = engine_with(GameConfig {
            round_duration_ms: 2_500,
            ..GameConfig::default()
        });
        engine.start().unwrap();

        engine.tick();
        engine.tick();
        assert_eq!(engine.remaining_ms(), 500);
        assert_eq!(engine.tick(), TickOutcome::Expired);
        assert_eq!(engine.remaining_ms(), 0);
    }

    #[test]
    fn test_explicit_timeout_finishes_round() {
        let mut engine = started();
        engine.on_correct();
        engine.on_timeout();
        assert_eq!(engine.remaining_ms(), 0);
        assert_eq!(engine.pending_feedback(), Feedback::GameOver);
        assert!(engine.is_finished());
    }

    #[test]
    fn test_acknowledge_feedback_is_idempotent() {
        let mut engine = started();
        engine.on_correct();
        engine.acknowledge_feedback();
        assert_eq!(engine.pending_feedback(), Feedback::None);
        engine.acknowledge_feedback();
        assert_eq!(engine.pending_feedback(), Feedback::None);
    }

    #[test]
    fn test_input_ignored_outside_running() {
        let mut engine = engine_with(GameConfig::default());
        engine.on_correct();
        engine.on_skip();
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.tick(), TickOutcome::Ignored);

        engine.start().unwrap();
        engine.on_timeout();
        engine.on_correct();
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.pending_feedback(), Feedback::GameOver);
    }

    #[test]
    fn test_independent_cycling_engine() {
        let mut engine = engine_with(GameConfig {
            cycling: CyclingMode::Independent,
            ..GameConfig::default()
        });
        engine.start().unwrap();
        engine.on_skip();
        assert!(CARDS.iter().any(|card| card.word == engine.current_word()));
        assert!(CARDS.iter().any(|card| &card.image == engine.current_image()));
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut engine = started();
        engine.on_correct();
        engine.tick();

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.phase, Phase::Running);
        assert_eq!(snapshot.score, 1);
        assert_eq!(snapshot.remaining_ms, 9_000);
        assert_eq!(snapshot.remaining_secs(), 9);
        assert_eq!(snapshot.word, engine.current_word());
        assert_eq!(snapshot.feedback, Feedback::Panic);
        assert!(!snapshot.finished);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = GameConfig {
            tick_interval_ms: 0,
            ..GameConfig::default()
        };
        assert!(matches!(
            RoundEngine::with_cards(config, &CARDS, StdRng::seed_from_u64(1)),
            Err(GameError::InvalidConfig(_))
        ));
    }
}
