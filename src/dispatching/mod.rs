//! Dispatching rules, rule engine, and waiting queue.
//!
//! Decides which waiting shuttle a free charger takes next. The default
//! policy is highest priority first, then earliest arrival, then lowest id.
//!
//! # Usage
//!
//! ```
//! use u_charge::dispatching::{rules, RuleEngine, TieBreaker, WaitingQueue};
//! use u_charge::models::Shuttle;
//!
//! let engine = RuleEngine::new()
//!     .with_rule(rules::HighestPriority)
//!     .with_rule(rules::Fifo)
//!     .with_final_tie_breaker(TieBreaker::ById);
//!
//! let mut queue = WaitingQueue::new(&engine);
//! queue.push(Shuttle::new(2, 3, 0, 5));
//! queue.push(Shuttle::new(1, 5, 0, 10));
//! assert_eq!(queue.pop().map(|s| s.id), Some(1));
//! ```
//!
//! # Reference
//! Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

mod engine;
mod queue;
pub mod rules;

pub use engine::{RuleEngine, TieBreaker};
pub use queue::WaitingQueue;

use crate::models::Shuttle;
use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = dispatched first.
pub type RuleScore = i64;

/// A dispatching rule that scores a waiting shuttle.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules return smaller values for
/// shuttles that should be charged first.
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "PRIORITY", "FIFO").
    fn name(&self) -> &'static str;

    /// Scores a shuttle. Lower = dispatched first.
    fn evaluate(&self, shuttle: &Shuttle) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
