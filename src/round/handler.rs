use chrono::{DateTime, Utc};
use tokio::{
    sync::{mpsc, oneshot, watch},
    task::JoinHandle,
};
use uuid::Uuid;

use crate::{
    config::GameConfig,
    error::{GameError, GameResult},
    game::{Phase, RoundEngine, RoundSnapshot, TickOutcome, Ticker},
    round::messages::{PlayerAction, RoundSummary},
};

/// Queued player actions per round; taps are far slower than the loop
const ACTION_BUFFER: usize = 32;

/// Presentation-side handle to a running round.
///
/// Dropping the handle tears the round down.
#[derive(Debug)]
pub struct RoundHandle {
    round_id: Uuid,
    actions: mpsc::Sender<PlayerAction>,
    snapshots: watch::Receiver<RoundSnapshot>,
    cancel: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<RoundSummary>>,
}

/// Start a round over the built-in cards, ticking with `ticker`
pub fn spawn_round<T>(config: GameConfig, ticker: T) -> GameResult<RoundHandle>
where
    T: Ticker + 'static,
{
    let engine = RoundEngine::new(config)?;
    spawn_with_engine(engine, ticker)
}

/// Start an idle engine and hand it to its own task
pub fn spawn_with_engine<T>(mut engine: RoundEngine, mut ticker: T) -> GameResult<RoundHandle>
where
    T: Ticker + 'static,
{
    engine.start()?;
    ticker.start(engine.config().tick_interval());

    let round_id = Uuid::new_v4();
    let started_at = Utc::now();
    let (action_tx, action_rx) = mpsc::channel(ACTION_BUFFER);
    let (snapshot_tx, snapshot_rx) = watch::channel(engine.snapshot());
    let (cancel_tx, cancel_rx) = oneshot::channel();

    tracing::info!(
        "Round {} started: {} ms, {:?} cycling",
        round_id,
        engine.remaining_ms(),
        engine.config().cycling
    );

    let task = tokio::spawn(run_round(
        round_id,
        started_at,
        engine,
        ticker,
        action_rx,
        snapshot_tx,
        cancel_rx,
    ));

    Ok(RoundHandle {
        round_id,
        actions: action_tx,
        snapshots: snapshot_rx,
        cancel: Some(cancel_tx),
        task: Some(task),
    })
}

impl RoundHandle {
    pub fn round_id(&self) -> Uuid {
        self.round_id
    }

    /// Receiver that is notified after every state change
    pub fn subscribe(&self) -> watch::Receiver<RoundSnapshot> {
        self.snapshots.clone()
    }

    /// Latest published state
    pub fn snapshot(&self) -> RoundSnapshot {
        self.snapshots.borrow().clone()
    }

    pub async fn correct(&self) -> GameResult<()> {
        self.send(PlayerAction::Correct).await
    }

    pub async fn skip(&self) -> GameResult<()> {
        self.send(PlayerAction::Skip).await
    }

    pub async fn acknowledge_feedback(&self) -> GameResult<()> {
        self.send(PlayerAction::AcknowledgeFeedback).await
    }

    pub async fn acknowledge_finish(&self) -> GameResult<()> {
        self.send(PlayerAction::AcknowledgeFinish).await
    }

    pub async fn send(&self, action: PlayerAction) -> GameResult<()> {
        self.actions
            .send(action)
            .await
            .map_err(|_| GameError::RoundClosed)
    }

    /// Stop the countdown and wait for the round task to wind down
    pub async fn cancel(&mut self) -> GameResult<RoundSummary> {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }

        let task = self.task.take().ok_or(GameError::RoundClosed)?;
        task.await.map_err(|e| {
            tracing::error!("Round {} task failed: {}", self.round_id, e);
            GameError::RoundClosed
        })
    }
}

/// The round loop. Cancellation wins over queued input, input over ticks.
async fn run_round<T: Ticker>(
    round_id: Uuid,
    started_at: DateTime<Utc>,
    mut engine: RoundEngine,
    mut ticker: T,
    mut actions: mpsc::Receiver<PlayerAction>,
    snapshots: watch::Sender<RoundSnapshot>,
    mut cancel: oneshot::Receiver<()>,
) -> RoundSummary {
    loop {
        tokio::select! {
            biased;

            // Fires on an explicit cancel and when the handle is dropped
            _ = &mut cancel => {
                tracing::info!("Round {} torn down", round_id);
                break;
            }
            action = actions.recv() => match action {
                Some(action) => apply_action(&mut engine, action),
                None => {
                    tracing::debug!("Round {} lost its handle", round_id);
                    break;
                }
            },
            _ = ticker.tick(), if ticker.is_active() => {
                if engine.tick() == TickOutcome::Expired {
                    ticker.cancel();
                    tracing::info!(
                        "Round {} timed out with score {}",
                        round_id,
                        engine.score()
                    );
                }
            }
        }

        let next = engine.snapshot();
        snapshots.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        });
    }

    ticker.cancel();

    let tally = engine.tally();
    RoundSummary {
        round_id,
        score: tally.score,
        corrects: tally.corrects,
        skips: tally.skips,
        timed_out: engine.phase() == Phase::Finished,
        started_at,
        ended_at: Utc::now(),
    }
}

fn apply_action(engine: &mut RoundEngine, action: PlayerAction) {
    match action {
        PlayerAction::Correct => engine.on_correct(),
        PlayerAction::Skip => engine.on_skip(),
        PlayerAction::AcknowledgeFeedback => engine.acknowledge_feedback(),
        PlayerAction::AcknowledgeFinish => engine.acknowledge_finish(),
    }
}
