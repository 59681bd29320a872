//! Fleet model.
//!
//! A fleet is the validated, arrival-ordered list of shuttles that every
//! simulation run replays. It is built once and shared immutably.

use serde::Serialize;

use super::Shuttle;
use crate::error::Result;
use crate::validation::validate_fleet;

/// A validated, non-empty list of shuttles sorted by arrival time.
///
/// Shuttles with equal arrival keep their input order.
#[derive(Debug, Clone, Serialize)]
pub struct Fleet {
    shuttles: Vec<Shuttle>,
}

impl Fleet {
    /// Validates `shuttles` and sorts them by arrival.
    ///
    /// # Errors
    /// [`ChargeError::EmptyFleet`] for an empty list,
    /// [`ChargeError::MalformedInput`] for duplicate ids, negative arrivals,
    /// non-positive service times, or a latest arrival plus total service
    /// that overflows [`Time`](super::Time).
    ///
    /// [`ChargeError::EmptyFleet`]: crate::error::ChargeError::EmptyFleet
    /// [`ChargeError::MalformedInput`]: crate::error::ChargeError::MalformedInput
    pub fn new(mut shuttles: Vec<Shuttle>) -> Result<Self> {
        validate_fleet(&shuttles)?;
        shuttles.sort_by_key(|s| s.arrival);
        Ok(Self { shuttles })
    }

    /// Shuttles in arrival order.
    pub fn shuttles(&self) -> &[Shuttle] {
        &self.shuttles
    }

    /// Number of shuttles.
    pub fn len(&self) -> usize {
        self.shuttles.len()
    }

    /// Always `false` for a constructed fleet.
    pub fn is_empty(&self) -> bool {
        self.shuttles.is_empty()
    }

    /// Shuttle at arrival-order position `index`.
    pub fn get(&self, index: usize) -> Option<&Shuttle> {
        self.shuttles.get(index)
    }

    /// Iterates shuttles in arrival order.
    pub fn iter(&self) -> std::slice::Iter<'_, Shuttle> {
        self.shuttles.iter()
    }
}

impl<'a> IntoIterator for &'a Fleet {
    type Item = &'a Shuttle;
    type IntoIter = std::slice::Iter<'a, Shuttle>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
