//! Run quality metrics (KPIs).
//!
//! Computes waiting-time and utilization indicators from a finished run.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Average wait | mean(completion - arrival - service) over the whole fleet |
//! | Maximum wait | Largest single wait |
//! | Total wait | Sum of all waits |
//! | Makespan | Latest completion time |
//! | Waited count | Shuttles that did not start on arrival |
//! | Utilization | Charger busy time / makespan |

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{Charger, Fleet, ShuttleId, Time};

/// Run performance indicators. Times are in minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunKpi {
    /// Mean wait over every shuttle of the fleet.
    pub average_wait: f64,
    /// Largest wait of any single shuttle.
    pub max_wait: Time,
    /// Sum of waits, saturating at `Time::MAX`.
    pub total_wait: Time,
    /// Latest completion time.
    pub makespan: Time,
    /// Number of shuttles with a non-zero wait.
    pub waited_count: usize,
    /// Utilization per charger, indexed by charger id.
    pub utilization_by_charger: Vec<f64>,
    /// Mean charger utilization.
    pub avg_utilization: f64,
}

impl RunKpi {
    /// Computes KPIs from per-shuttle completion times.
    ///
    /// Waits are derived from the completion recorded for each shuttle when
    /// it was assigned, never from the final charger state.
    pub fn calculate(
        fleet: &Fleet,
        completions: &HashMap<ShuttleId, Time>,
        chargers: &[Charger],
    ) -> Self {
        let mut total_wait: Time = 0;
        let mut wait_sum = 0.0;
        let mut max_wait: Time = 0;
        let mut waited_count = 0;
        let mut makespan: Time = 0;

        for shuttle in fleet {
            let Some(&completion) = completions.get(&shuttle.id) else {
                continue;
            };
            let wait = completion - shuttle.arrival - shuttle.service;
            total_wait = total_wait.saturating_add(wait);
            wait_sum += wait as f64;
            max_wait = max_wait.max(wait);
            makespan = makespan.max(completion);
            if wait > 0 {
                waited_count += 1;
            }
        }

        let average_wait = if fleet.is_empty() {
            0.0
        } else {
            wait_sum / fleet.len() as f64
        };

        let utilization_by_charger: Vec<f64> =
            chargers.iter().map(|c| c.utilization(makespan)).collect();
        let avg_utilization = if utilization_by_charger.is_empty() {
            0.0
        } else {
            utilization_by_charger.iter().sum::<f64>() / utilization_by_charger.len() as f64
        };

        Self {
            average_wait,
            max_wait,
            total_wait,
            makespan,
            waited_count,
            utilization_by_charger,
            avg_utilization,
        }
    }

    /// Whether the average wait is within `max_average_wait`.
    pub fn meets_threshold(&self, max_average_wait: f64) -> bool {
        self.average_wait <= max_average_wait
    }
}
