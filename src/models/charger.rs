//! Charger model.
//!
//! A charger is a single-capacity resource. It serves one shuttle at a
//! time and becomes free again at `available_time`.

use serde::{Deserialize, Serialize};

use super::{Shuttle, Time};

/// A charging station.
///
/// Chargers start free at t=0 and are only mutated through [`Charger::assign`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Charger {
    /// Charger index (0-based, also the dispatch order).
    pub id: usize,
    /// Earliest time the charger can accept a new shuttle.
    pub available_time: Time,
    /// Shuttle currently (or most recently) on the charger.
    pub current: Option<Shuttle>,
    /// Accumulated charging time across all assignments.
    pub busy_time: Time,
    /// Number of shuttles served.
    pub served: usize,
}

impl Charger {
    /// Creates a free charger.
    pub fn new(id: usize) -> Self {
        Self {
            id,
            available_time: 0,
            current: None,
            busy_time: 0,
            served: 0,
        }
    }

    /// Whether the charger can accept a shuttle at `time`.
    #[inline]
    pub fn is_available(&self, time: Time) -> bool {
        self.available_time <= time
    }

    /// Starts charging `shuttle` at `time` and returns its completion time.
    ///
    /// The caller guarantees the charger is free at `time` and the shuttle
    /// has already arrived.
    pub fn assign(&mut self, shuttle: Shuttle, time: Time) -> Time {
        debug_assert!(self.is_available(time), "charger {} is busy", self.id);
        debug_assert!(
            time >= shuttle.arrival,
            "shuttle {} has not arrived",
            shuttle.id
        );

        let completion = shuttle.completion_if_started_at(time);
        self.current = Some(shuttle);
        self.available_time = completion;
        self.busy_time += shuttle.service;
        self.served += 1;
        completion
    }

    /// Fraction of `horizon` spent charging (0.0 when the horizon is empty).
    pub fn utilization(&self, horizon: Time) -> f64 {
        if horizon <= 0 {
            return 0.0;
        }
        self.busy_time as f64 / horizon as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_charger_is_free() {
        let c = Charger::new(0);
        assert!(c.is_available(0));
        assert!(c.current.is_none());
        assert_eq!(c.served, 0);
    }

    #[test]
    fn test_assign_occupies_until_completion() {
        let mut c = Charger::new(2);
        let completion = c.assign(Shuttle::new(1, 0, 3, 10), 5);

        assert_eq!(completion, 15);
        assert_eq!(c.available_time, 15);
        assert_eq!(c.current.map(|s| s.id), Some(1));
        assert!(!c.is_available(14));
        assert!(c.is_available(15));
    }

    #[test]
    fn test_assign_accumulates_busy_time() {
        let mut c = Charger::new(0);
        c.assign(Shuttle::new(1, 0, 0, 10), 0);
        c.assign(Shuttle::new(2, 0, 0, 4), 12);

        assert_eq!(c.busy_time, 14);
        assert_eq!(c.served, 2);
        assert_eq!(c.available_time, 16);
        assert_eq!(c.current.map(|s| s.id), Some(2));
        assert!((c.utilization(16) - 0.875).abs() < 1e-10);
    }

    #[test]
    fn test_utilization_empty_horizon() {
        let c = Charger::new(0);
        assert!((c.utilization(0) - 0.0).abs() < 1e-10);
    }
}
