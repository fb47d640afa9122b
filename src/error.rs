use thiserror::Error;

/// Errors raised by the round engine and its session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("{0} pool is empty")]
    EmptyPool(&'static str),

    #[error("round already started")]
    AlreadyStarted,

    #[error("round is no longer running")]
    RoundClosed,
}

pub type GameResult<T> = Result<T, GameError>;
