//! Synthetic fleet generation.
//!
//! Produces random but reproducible fleets for experiments and tests.
//! Ids are sequential (`1..=count`); priority, arrival, and service are drawn
//! uniformly from the configured ranges.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{ChargeError, Result};
use crate::models::{Fleet, Shuttle, Time};

/// Random fleet generator.
///
/// # Example
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use u_charge::generator::FleetGenerator;
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let fleet = FleetGenerator::new(10).generate(&mut rng).unwrap();
/// assert_eq!(fleet.len(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetGenerator {
    /// Number of shuttles.
    pub count: usize,
    /// Inclusive priority range.
    pub priority_range: (i32, i32),
    /// Arrivals are drawn from `0..=arrival_horizon`.
    pub arrival_horizon: Time,
    /// Inclusive service duration range.
    pub service_range: (Time, Time),
}

impl FleetGenerator {
    /// Creates a generator with priorities 1..=5, arrivals within 120
    /// minutes, and services of 10..=60 minutes.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            priority_range: (1, 5),
            arrival_horizon: 120,
            service_range: (10, 60),
        }
    }

    pub fn with_priority_range(mut self, min: i32, max: i32) -> Self {
        self.priority_range = (min, max);
        self
    }

    pub fn with_arrival_horizon(mut self, horizon: Time) -> Self {
        self.arrival_horizon = horizon;
        self
    }

    pub fn with_service_range(mut self, min: Time, max: Time) -> Self {
        self.service_range = (min, max);
        self
    }

    /// Draws a fleet from `rng`.
    ///
    /// # Errors
    /// [`ChargeError::EmptyFleet`] for `count == 0`,
    /// [`ChargeError::MalformedInput`] for inverted or out-of-domain ranges.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Fleet> {
        let (p_min, p_max) = self.priority_range;
        let (s_min, s_max) = self.service_range;
        if p_min > p_max {
            return Err(ChargeError::malformed(format!(
                "priority range {p_min}..={p_max} is empty"
            )));
        }
        if s_min < 1 || s_min > s_max {
            return Err(ChargeError::malformed(format!(
                "service range {s_min}..={s_max} must be positive and non-empty"
            )));
        }
        if self.arrival_horizon < 0 {
            return Err(ChargeError::malformed(format!(
                "arrival horizon {} is negative",
                self.arrival_horizon
            )));
        }

        let shuttles = (1..=self.count)
            .map(|i| {
                Shuttle::new(
                    i as u32,
                    rng.random_range(p_min..=p_max),
                    rng.random_range(0..=self.arrival_horizon),
                    rng.random_range(s_min..=s_max),
                )
            })
            .collect();

        Fleet::new(shuttles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generated_values_in_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let fleet = FleetGenerator::new(200)
            .with_priority_range(-2, 2)
            .with_arrival_horizon(30)
            .with_service_range(3, 7)
            .generate(&mut rng)
            .unwrap();

        assert_eq!(fleet.len(), 200);
        for s in &fleet {
            assert!((-2..=2).contains(&s.priority));
            assert!((0..=30).contains(&s.arrival));
            assert!((3..=7).contains(&s.service));
        }
        assert!(fleet.shuttles().windows(2).all(|w| w[0].arrival <= w[1].arrival));
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let gen = FleetGenerator::new(25);
        let a = gen.generate(&mut StdRng::seed_from_u64(9)).unwrap();
        let b = gen.generate(&mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a.shuttles(), b.shuttles());
    }

    #[test]
    fn test_zero_count_is_empty_fleet() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            FleetGenerator::new(0).generate(&mut rng),
            Err(ChargeError::EmptyFleet)
        ));
    }

    #[test]
    fn test_invalid_ranges() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(FleetGenerator::new(3)
            .with_priority_range(5, 1)
            .generate(&mut rng)
            .is_err());
        assert!(FleetGenerator::new(3)
            .with_service_range(0, 10)
            .generate(&mut rng)
            .is_err());
        assert!(FleetGenerator::new(3)
            .with_arrival_horizon(-1)
            .generate(&mut rng)
            .is_err());
    }
}
