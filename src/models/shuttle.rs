//! Shuttle model.
//!
//! A shuttle is a unit that needs one uninterrupted charging session.
//! It arrives at a fixed time, carries a priority class, and occupies a
//! charger for its service duration.

use serde::{Deserialize, Serialize};

/// Simulated time in minutes relative to the simulation epoch (t=0).
pub type Time = i64;

/// Shuttle identifier.
pub type ShuttleId = u32;

/// A shuttle waiting to be charged.
///
/// Immutable once created. Validity (non-negative arrival, positive service,
/// unique ids) is checked when shuttles are collected into a [`Fleet`].
///
/// [`Fleet`]: super::Fleet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shuttle {
    /// Unique shuttle identifier.
    pub id: ShuttleId,
    /// Dispatch priority (higher = more urgent).
    pub priority: i32,
    /// Arrival time (minutes).
    pub arrival: Time,
    /// Charging duration (minutes).
    pub service: Time,
}

impl Shuttle {
    /// Creates a new shuttle.
    pub fn new(id: ShuttleId, priority: i32, arrival: Time, service: Time) -> Self {
        Self {
            id,
            priority,
            arrival,
            service,
        }
    }

    /// Wait incurred if charging starts at `start`.
    #[inline]
    pub fn wait_if_started_at(&self, start: Time) -> Time {
        start - self.arrival
    }

    /// Completion time if charging starts at `start`.
    ///
    /// Shuttles of a validated [`Fleet`](crate::models::Fleet) never overflow
    /// here: `Fleet::new` rejects fleets whose latest arrival plus total
    /// service does not fit in [`Time`].
    #[inline]
    pub fn completion_if_started_at(&self, start: Time) -> Time {
        start + self.service
    }
}
