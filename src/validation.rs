//! Input validation for shuttle fleets.
//!
//! Checks structural integrity of shuttle records before any simulation
//! runs. Detects:
//! - Empty fleets
//! - Duplicate shuttle IDs
//! - Negative arrival times
//! - Non-positive service durations
//! - Completion times that would overflow [`Time`](crate::models::Time)
//!
//! All problems are collected, not just the first one.

use crate::models::{Shuttle, Time};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The fleet has no shuttles.
    EmptyFleet,
    /// Two shuttles share the same ID.
    DuplicateId,
    /// A shuttle arrives before t=0.
    NegativeArrival,
    /// A shuttle needs zero or negative charging time.
    NonPositiveService,
    /// Completion times would not fit in [`Time`](crate::models::Time).
    TimeOverflow,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a list of shuttles.
///
/// Checks:
/// 1. At least one shuttle
/// 2. No duplicate shuttle IDs
/// 3. Every arrival is non-negative
/// 4. Every service duration is positive
/// 5. `latest arrival + total service` fits in `Time`; no completion time
///    of any run can exceed this horizon
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_fleet(shuttles: &[Shuttle]) -> ValidationResult {
    if shuttles.is_empty() {
        return Err(vec![ValidationError::new(
            ValidationErrorKind::EmptyFleet,
            "Fleet has no shuttles",
        )]);
    }

    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for s in shuttles {
        if !ids.insert(s.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate shuttle ID: {}", s.id),
            ));
        }

        if s.arrival < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!("Shuttle {} has negative arrival time {}", s.id, s.arrival),
            ));
        }

        if s.service <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveService,
                format!("Shuttle {} has non-positive service time {}", s.id, s.service),
            ));
        }

        if s.arrival.checked_add(s.service).is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::TimeOverflow,
                format!(
                    "Shuttle {} completion time overflows (arrival {} + service {})",
                    s.id, s.arrival, s.service
                ),
            ));
        }
    }

    if errors.is_empty() && completion_horizon(shuttles).is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::TimeOverflow,
            "Latest arrival plus total service time overflows",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Upper bound on every completion time: latest arrival + total service.
///
/// Chargers never idle while a shuttle waits, so no shuttle can finish later.
fn completion_horizon(shuttles: &[Shuttle]) -> Option<Time> {
    let last_arrival = shuttles.iter().map(|s| s.arrival).max().unwrap_or(0);
    shuttles
        .iter()
        .try_fold(last_arrival, |acc, s| acc.checked_add(s.service))
}
