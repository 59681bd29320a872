//! Discrete-event charging simulation and run metrics.
//!
//! Time only advances to meaningful events (arrivals and charger
//! completions). Every run owns a fresh set of chargers and its own
//! waiting queue, so runs never interact.
//!
//! # KPI
//!
//! `RunKpi` computes average and maximum wait, makespan, and charger
//! utilization from the completions recorded during a run.

mod engine;
mod kpi;

pub use engine::{simulate, RunState, Simulation, SimulationRun};
pub use kpi::RunKpi;
