//! Error type for fleet loading, simulation, and capacity search.

use thiserror::Error;

use crate::validation::{ValidationError, ValidationErrorKind};

/// Errors surfaced by the charging core.
#[derive(Debug, Error)]
pub enum ChargeError {
    /// Input could not be parsed or violates a field constraint.
    ///
    /// `line` is 1-based when the problem maps to a specific input line.
    #[error("malformed input{}: {reason}", at_line(.line))]
    MalformedInput { line: Option<usize>, reason: String },

    /// The fleet has no shuttles, so an average wait is undefined.
    #[error("fleet is empty: average waiting time is undefined")]
    EmptyFleet,

    /// A simulation run was requested with zero chargers.
    #[error("at least one charger is required")]
    NoChargers,

    /// The wait threshold is NaN or infinite.
    #[error("invalid waiting time threshold: {0}")]
    InvalidThreshold(f64),

    /// No charger count up to the search bound meets the threshold.
    #[error(
        "threshold {threshold} unreachable: best average wait with {max_chargers} chargers is {best_average_wait:.5}"
    )]
    UnreachableThreshold {
        threshold: f64,
        max_chargers: usize,
        best_average_wait: f64,
    },

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

impl ChargeError {
    /// Creates a malformed-input error tied to an input line.
    pub fn malformed_at(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            line: Some(line),
            reason: reason.into(),
        }
    }

    /// Creates a malformed-input error without a line reference.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            line: None,
            reason: reason.into(),
        }
    }
}

impl From<Vec<ValidationError>> for ChargeError {
    fn from(errors: Vec<ValidationError>) -> Self {
        if errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::EmptyFleet)
        {
            return Self::EmptyFleet;
        }
        let reason = errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        Self::malformed(reason)
    }
}

fn at_line(line: &Option<usize>) -> String {
    match line {
        Some(l) => format!(" at line {l}"),
        None => String::new(),
    }
}

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, ChargeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_display_with_line() {
        let err = ChargeError::malformed_at(3, "expected 4 fields, found 2");
        assert_eq!(
            err.to_string(),
            "malformed input at line 3: expected 4 fields, found 2"
        );
    }

    #[test]
    fn test_malformed_display_without_line() {
        let err = ChargeError::malformed("bad");
        assert_eq!(err.to_string(), "malformed input: bad");
    }

    #[test]
    fn test_from_validation_errors_joins_messages() {
        let errors = vec![
            ValidationError::new(ValidationErrorKind::DuplicateId, "Duplicate shuttle ID: 1"),
            ValidationError::new(
                ValidationErrorKind::NonPositiveService,
                "Shuttle 2 has non-positive service time 0",
            ),
        ];
        match ChargeError::from(errors) {
            ChargeError::MalformedInput { line, reason } => {
                assert_eq!(line, None);
                assert!(reason.contains("Duplicate shuttle ID: 1"));
                assert!(reason.contains("; Shuttle 2"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_validation_errors_empty_fleet_wins() {
        let errors = vec![ValidationError::new(
            ValidationErrorKind::EmptyFleet,
            "Fleet has no shuttles",
        )];
        assert!(matches!(ChargeError::from(errors), ChargeError::EmptyFleet));
    }
}
