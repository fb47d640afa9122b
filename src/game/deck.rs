use std::collections::VecDeque;

use rand::{seq::SliceRandom, Rng};

use crate::error::{GameError, GameResult};

/// A cyclic shuffled queue over a fixed pool.
///
/// The head of the queue is moved into `current` on every advance. Once the
/// queue runs dry it is refilled with a fresh permutation of the whole pool,
/// so there is always a next item to show.
#[derive(Debug, Clone)]
pub struct Deck<T> {
    label: &'static str,
    pool: Vec<T>,
    queue: VecDeque<T>,
    current: T,
}

impl<T: Clone> Deck<T> {
    /// Deal a shuffled permutation of `pool`; the first item becomes current
    pub fn new(label: &'static str, pool: Vec<T>, rng: &mut impl Rng) -> GameResult<Self> {
        let mut queue = Self::shuffled(&pool, rng);
        let current = queue.pop_front().ok_or(GameError::EmptyPool(label))?;

        let mut deck = Self {
            label,
            pool,
            queue,
            current,
        };
        deck.refill_if_empty(rng);
        Ok(deck)
    }

    /// Throw away the remaining queue and deal again from the full pool
    pub fn reset(&mut self, rng: &mut impl Rng) {
        self.queue = Self::shuffled(&self.pool, rng);
        if let Some(first) = self.queue.pop_front() {
            self.current = first;
        }
        self.refill_if_empty(rng);
    }

    /// Pop the next item into the current slot
    pub fn advance(&mut self, rng: &mut impl Rng) -> &T {
        if let Some(next) = self.queue.pop_front() {
            self.current = next;
        }
        self.refill_if_empty(rng);
        &self.current
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    /// Items left before the next reshuffle
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn pool_size(&self) -> usize {
        self.pool.len()
    }

    fn refill_if_empty(&mut self, rng: &mut impl Rng) {
        if self.queue.is_empty() {
            tracing::debug!("{} deck exhausted, reshuffling {} items", self.label, self.pool.len());
            self.queue = Self::shuffled(&self.pool, rng);
        }
    }

    fn shuffled(pool: &[T], rng: &mut impl Rng) -> VecDeque<T> {
        let mut items = pool.to_vec();
        items.shuffle(rng);
        items.into()
    }
}
