//! Built-in dispatching rules.
//!
//! # Categories
//!
//! - **Priority**: PRIORITY
//! - **Queue**: FIFO
//! - **Time-based**: SPT, LPT
//!
//! # Score Convention
//! All rules return lower scores for shuttles that should charge first.

use std::sync::Arc;

use super::{DispatchingRule, RuleScore};
use crate::models::Shuttle;

/// Highest priority first.
#[derive(Debug, Clone, Copy)]
pub struct HighestPriority;

impl DispatchingRule for HighestPriority {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn evaluate(&self, shuttle: &Shuttle) -> RuleScore {
        -RuleScore::from(shuttle.priority)
    }

    fn description(&self) -> &'static str {
        "Highest Priority First"
    }
}

/// First In First Out: earliest arrival first.
#[derive(Debug, Clone, Copy)]
pub struct Fifo;

impl DispatchingRule for Fifo {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn evaluate(&self, shuttle: &Shuttle) -> RuleScore {
        shuttle.arrival
    }

    fn description(&self) -> &'static str {
        "First In First Out"
    }
}

/// Shortest Processing Time: shortest charging session first.
///
/// # Reference
/// Smith (1956), optimal for minimizing mean flow time on a single machine.
#[derive(Debug, Clone, Copy)]
pub struct Spt;

impl DispatchingRule for Spt {
    fn name(&self) -> &'static str {
        "SPT"
    }

    fn evaluate(&self, shuttle: &Shuttle) -> RuleScore {
        shuttle.service
    }

    fn description(&self) -> &'static str {
        "Shortest Processing Time"
    }
}

/// Longest Processing Time: longest charging session first.
#[derive(Debug, Clone, Copy)]
pub struct Lpt;

impl DispatchingRule for Lpt {
    fn name(&self) -> &'static str {
        "LPT"
    }

    fn evaluate(&self, shuttle: &Shuttle) -> RuleScore {
        -shuttle.service
    }

    fn description(&self) -> &'static str {
        "Longest Processing Time"
    }
}

/// Looks up a built-in rule by name (case-insensitive).
pub fn by_name(name: &str) -> Option<Arc<dyn DispatchingRule>> {
    match name.trim().to_ascii_uppercase().as_str() {
        "PRIORITY" => Some(Arc::new(HighestPriority)),
        "FIFO" => Some(Arc::new(Fifo)),
        "SPT" => Some(Arc::new(Spt)),
        "LPT" => Some(Arc::new(Lpt)),
        _ => None,
    }
}
