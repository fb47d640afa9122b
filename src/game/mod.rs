// Round engine modules

pub mod catalog;
pub mod deck;
pub mod engine;
pub mod prompts;
pub mod timer;

pub use catalog::{Card, ImageRef};
pub use engine::{Feedback, Phase, RoundEngine, RoundSnapshot, RoundTally, TickOutcome};
pub use timer::{IntervalTicker, Ticker};

#[cfg(test)]
pub use timer::{ManualTicker, TickTrigger};
