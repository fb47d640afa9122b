// Round session: one task per round owning the engine and its ticker

pub mod handler;
pub mod messages;

pub use handler::{spawn_round, spawn_with_engine, RoundHandle};
pub use messages::{PlayerAction, RoundSummary};
