//! Waiting queue ordered by a rule engine.

use std::cmp::Ordering;

use super::RuleEngine;
use crate::models::Shuttle;

/// Arrived shuttles waiting for a free charger.
///
/// Kept sorted so that the next shuttle to dispatch sits at the back of the
/// buffer. Shuttles that compare equal are served in insertion order.
#[derive(Debug, Clone)]
pub struct WaitingQueue<'r> {
    rules: &'r RuleEngine,
    // worst ... best
    shuttles: Vec<Shuttle>,
}

impl<'r> WaitingQueue<'r> {
    /// Creates an empty queue ordered by `rules`.
    pub fn new(rules: &'r RuleEngine) -> Self {
        Self {
            rules,
            shuttles: Vec::new(),
        }
    }

    /// Adds an arrived shuttle.
    pub fn push(&mut self, shuttle: Shuttle) {
        let idx = self
            .shuttles
            .partition_point(|q| self.rules.compare(q, &shuttle) == Ordering::Greater);
        self.shuttles.insert(idx, shuttle);
    }

    /// Removes and returns the shuttle to dispatch next.
    pub fn pop(&mut self) -> Option<Shuttle> {
        self.shuttles.pop()
    }

    /// Number of waiting shuttles.
    pub fn len(&self) -> usize {
        self.shuttles.len()
    }

    /// Whether no shuttle is waiting.
    pub fn is_empty(&self) -> bool {
        self.shuttles.is_empty()
    }
}
