use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{self, Instant, Interval};

/// Source of countdown ticks for a round.
///
/// `tick` never resolves before `start` or after `cancel`, so a round loop can
/// always include it in a `select!`.
#[async_trait]
pub trait Ticker: Send {
    fn start(&mut self, period: Duration);

    async fn tick(&mut self);

    fn cancel(&mut self);

    fn is_active(&self) -> bool;
}

/// Wall-clock ticker backed by a tokio interval
#[derive(Debug, Default)]
pub struct IntervalTicker {
    interval: Option<Interval>,
}

impl IntervalTicker {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Ticker for IntervalTicker {
    fn start(&mut self, period: Duration) {
        // First tick one full period after start, not immediately
        self.interval = Some(time::interval_at(Instant::now() + period, period));
    }

    async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }

    fn cancel(&mut self) {
        self.interval = None;
    }

    fn is_active(&self) -> bool {
        self.interval.is_some()
    }
}

#[cfg(test)]
pub use manual::{ManualTicker, TickTrigger};
