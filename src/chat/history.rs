//! Rolling request context
//!
//! The turns forwarded with each completion request. Kept apart from the
//! message log: only successful exchanges land here, and it is emptied on
//! every session switch.

use crate::llm::Turn;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct HistoryWindow {
    turns: VecDeque<Turn>,
    cap: usize,
}

impl HistoryWindow {
    pub fn new(cap: usize) -> Self {
        Self {
            turns: VecDeque::with_capacity(cap + 2),
            cap,
        }
    }

    /// Prior turns (at most `cap`) followed by the pending user turn
    pub fn request_turns(&self, pending: &str) -> Vec<Turn> {
        let skip = self.turns.len().saturating_sub(self.cap);
        self.turns
            .iter()
            .skip(skip)
            .cloned()
            .chain(std::iter::once(Turn::user(pending)))
            .collect()
    }

    /// Remember a successful exchange, dropping the oldest turns past the cap
    pub fn record_exchange(&mut self, user_text: &str, reply: &str) {
        self.turns.push_back(Turn::user(user_text));
        self.turns.push_back(Turn::model(reply));
        while self.turns.len() > self.cap {
            self.turns.pop_front();
        }
    }

    pub fn reset(&mut self) {
        self.turns.clear();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.turns.len()
    }
}
