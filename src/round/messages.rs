use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Input sent from the presentation layer to a running round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlayerAction {
    Correct,
    Skip,
    AcknowledgeFeedback,
    AcknowledgeFinish,
}

/// What is left of a round once it has been torn down
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round_id: Uuid,
    pub score: i32,
    pub corrects: u32,
    pub skips: u32,
    /// False when the round was abandoned before the countdown ran out
    pub timed_out: bool,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
}
