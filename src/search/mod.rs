//! Minimum-charger capacity search.
//!
//! Re-runs the simulation with K = 1, 2, 3, … chargers until the average
//! wait meets the configured threshold. Each run is independent, so a
//! parallel strategy can evaluate a batch of consecutive K values at once
//! and keep the smallest satisfying one.
//!
//! # Algorithm
//!
//! Linear scan over K. Relies on the empirical property that adding a
//! charger never increases the average wait; no binary search is attempted.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dispatching::RuleEngine;
use crate::error::{ChargeError, Result};
use crate::models::Fleet;
use crate::simulation::{simulate, SimulationRun};

/// How candidate charger counts are evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchStrategy {
    /// One K at a time, ascending.
    #[default]
    Linear,
    /// Batches of consecutive K values evaluated concurrently.
    ///
    /// `batch == 0` uses the rayon thread count.
    Parallel { batch: usize },
}

/// Capacity search configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum acceptable average wait (minutes).
    pub max_average_wait: f64,
    /// Evaluation strategy.
    #[serde(default)]
    pub strategy: SearchStrategy,
    /// Upper bound on K. `None` = fleet size.
    #[serde(default)]
    pub max_chargers: Option<usize>,
}

impl SearchConfig {
    /// Creates a linear search for the given threshold.
    pub fn new(max_average_wait: f64) -> Self {
        Self {
            max_average_wait,
            strategy: SearchStrategy::Linear,
            max_chargers: None,
        }
    }

    /// Sets the evaluation strategy.
    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Caps the number of chargers tried.
    pub fn with_max_chargers(mut self, max_chargers: usize) -> Self {
        self.max_chargers = Some(max_chargers);
        self
    }

    /// Checks the threshold and the charger bound.
    pub fn validate(&self) -> Result<()> {
        if !self.max_average_wait.is_finite() {
            return Err(ChargeError::InvalidThreshold(self.max_average_wait));
        }
        if self.max_chargers == Some(0) {
            return Err(ChargeError::NoChargers);
        }
        Ok(())
    }

    /// Largest K worth trying for `fleet`.
    fn upper_bound(&self, fleet: &Fleet) -> usize {
        let n = fleet.len().max(1);
        self.max_chargers.map_or(n, |m| m.min(n))
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Average wait observed for one candidate K.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    pub chargers: usize,
    pub average_wait: f64,
}

/// Result of a successful capacity search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// Minimum charger count meeting the threshold.
    pub chargers: usize,
    /// Average wait with that many chargers.
    pub average_wait: f64,
    /// The satisfying run, including its event log.
    pub run: SimulationRun,
    /// Every K evaluated, ascending.
    pub attempts: Vec<Attempt>,
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Minimum number of chargers required: {}", self.chargers)?;
        write!(f, "Average waiting time: {:.5} minutes", self.average_wait)
    }
}

/// Finds the minimum number of chargers meeting an average-wait threshold.
///
/// # Example
///
/// ```
/// use u_charge::models::{Fleet, Shuttle};
/// use u_charge::search::{CapacitySearch, SearchConfig};
///
/// let fleet = Fleet::new(vec![
///     Shuttle::new(1, 5, 0, 10),
///     Shuttle::new(2, 3, 0, 5),
///     Shuttle::new(3, 5, 2, 4),
/// ]).unwrap();
///
/// let outcome = CapacitySearch::new(SearchConfig::new(1.0)).search(&fleet).unwrap();
/// assert_eq!(outcome.chargers, 2);
/// assert!((outcome.average_wait - 1.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CapacitySearch {
    config: SearchConfig,
    rules: RuleEngine,
}

impl CapacitySearch {
    /// Creates a search using the default dispatching policy.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            rules: RuleEngine::default_policy(),
        }
    }

    /// Replaces the dispatching policy.
    pub fn with_rule_engine(mut self, rules: RuleEngine) -> Self {
        self.rules = rules;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Runs the search over `fleet`.
    ///
    /// # Errors
    /// - [`ChargeError::InvalidThreshold`] for a non-finite threshold.
    /// - [`ChargeError::NoChargers`] if `max_chargers` is zero.
    /// - [`ChargeError::UnreachableThreshold`] if no K up to the bound
    ///   satisfies the threshold.
    pub fn search(&self, fleet: &Fleet) -> Result<SearchOutcome> {
        self.config.validate()?;
        let upper = self.config.upper_bound(fleet);
        tracing::info!(
            shuttles = fleet.len(),
            threshold = self.config.max_average_wait,
            max_chargers = upper,
            rules = ?self.rules.rule_names(),
            "starting capacity search"
        );

        let outcome = match self.config.strategy {
            SearchStrategy::Linear => self.search_linear(fleet, upper),
            SearchStrategy::Parallel { batch } => self.search_parallel(fleet, upper, batch),
        }?;

        tracing::info!(
            chargers = outcome.chargers,
            average_wait = outcome.average_wait,
            "capacity search complete"
        );
        Ok(outcome)
    }

    fn search_linear(&self, fleet: &Fleet, upper: usize) -> Result<SearchOutcome> {
        let mut attempts = Vec::new();

        for k in 1..=upper {
            let run = simulate(fleet, k, &self.rules)?;
            let attempt = self.record_attempt(&mut attempts, &run);
            if run.kpi.meets_threshold(self.config.max_average_wait) {
                return Ok(SearchOutcome {
                    chargers: attempt.chargers,
                    average_wait: attempt.average_wait,
                    run,
                    attempts,
                });
            }
        }

        Err(self.unreachable(upper, &attempts))
    }

    fn search_parallel(&self, fleet: &Fleet, upper: usize, batch: usize) -> Result<SearchOutcome> {
        let batch = if batch == 0 {
            rayon::current_num_threads()
        } else {
            batch
        };
        let batch = batch.clamp(1, upper.max(1));
        let mut attempts = Vec::new();
        let mut start = 1;

        while start <= upper {
            let end = (start + batch - 1).min(upper);
            let runs = (start..=end)
                .into_par_iter()
                .map(|k| simulate(fleet, k, &self.rules))
                .collect::<Result<Vec<_>>>()?;

            for run in &runs {
                self.record_attempt(&mut attempts, run);
            }

            // Runs come back in K order, so the first hit is the minimum.
            if let Some(run) = runs
                .into_iter()
                .find(|r| r.kpi.meets_threshold(self.config.max_average_wait))
            {
                return Ok(SearchOutcome {
                    chargers: run.chargers,
                    average_wait: run.average_wait(),
                    run,
                    attempts,
                });
            }
            start = end + 1;
        }

        Err(self.unreachable(upper, &attempts))
    }

    fn record_attempt(&self, attempts: &mut Vec<Attempt>, run: &SimulationRun) -> Attempt {
        let attempt = Attempt {
            chargers: run.chargers,
            average_wait: run.average_wait(),
        };
        tracing::info!(
            chargers = attempt.chargers,
            average_wait = attempt.average_wait,
            "capacity search attempt"
        );
        attempts.push(attempt);
        attempt
    }

    fn unreachable(&self, upper: usize, attempts: &[Attempt]) -> ChargeError {
        let best_average_wait = attempts
            .iter()
            .map(|a| a.average_wait)
            .fold(f64::INFINITY, f64::min);
        tracing::warn!(
            threshold = self.config.max_average_wait,
            max_chargers = upper,
            best_average_wait,
            "threshold unreachable"
        );
        ChargeError::UnreachableThreshold {
            threshold: self.config.max_average_wait,
            max_chargers: upper,
            best_average_wait,
        }
    }
}

/// Linear search with the default dispatching policy.
pub fn min_chargers(fleet: &Fleet, max_average_wait: f64) -> Result<SearchOutcome> {
    CapacitySearch::new(SearchConfig::new(max_average_wait)).search(fleet)
}
