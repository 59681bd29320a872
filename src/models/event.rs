//! Assignment events.
//!
//! Every time a charger takes a shuttle the engine records an event. The
//! event log of a run is ordered by simulated time, then by charger id.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ShuttleId, Time};

/// A charger-shuttle assignment at a point in simulated time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentEvent {
    /// Charger that took the shuttle.
    pub charger_id: usize,
    /// Assigned shuttle.
    pub shuttle_id: ShuttleId,
    /// Time charging started.
    pub time: Time,
    /// Time the shuttle spent waiting (`time - arrival`).
    pub wait: Time,
}

impl AssignmentEvent {
    /// Creates a new event.
    pub fn new(charger_id: usize, shuttle_id: ShuttleId, time: Time, wait: Time) -> Self {
        Self {
            charger_id,
            shuttle_id,
            time,
            wait,
        }
    }
}

impl fmt::Display for AssignmentEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Charger {} takes shuttle {} at minute {} (wait: {} mins)",
            self.charger_id, self.shuttle_id, self.time, self.wait
        )
    }
}
