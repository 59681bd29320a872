//! Discrete-event charging simulation.
//!
//! # Algorithm
//!
//! Each step at the current simulated time:
//! 1. Admit every shuttle whose arrival has passed into the waiting queue.
//! 2. Walk the chargers by ascending id; each free charger takes the best
//!    waiting shuttle. Assignments are never revoked.
//! 3. Jump to the next event time: the earliest completion among busy
//!    chargers or the next arrival, whichever comes first.
//!
//! The run is done once every shuttle has been admitted and the queue is
//! empty.
//!
//! # Complexity
//! O(n * (k + q)) where n=shuttles, k=chargers, q=queue length.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::RunKpi;
use crate::dispatching::{RuleEngine, WaitingQueue};
use crate::error::{ChargeError, Result};
use crate::models::{AssignmentEvent, Charger, Fleet, ShuttleId, Time};

/// Lifecycle of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    /// Constructed, no step taken yet.
    Idle,
    /// Main loop active.
    Running,
    /// Every shuttle has been assigned.
    Done,
}

/// Outcome of one simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationRun {
    /// Number of chargers simulated.
    pub chargers: usize,
    /// Assignments in the order they happened.
    pub events: Vec<AssignmentEvent>,
    /// Completion time recorded for each shuttle at assignment.
    pub completions: HashMap<ShuttleId, Time>,
    /// Derived metrics.
    pub kpi: RunKpi,
}

impl SimulationRun {
    /// Mean wait over the whole fleet.
    pub fn average_wait(&self) -> f64 {
        self.kpi.average_wait
    }
}

/// A single simulation run with a fixed number of chargers.
///
/// Owns its chargers and waiting queue; the fleet and rule engine are only
/// borrowed, so any number of runs can share them.
///
/// # Example
///
/// ```
/// use u_charge::dispatching::RuleEngine;
/// use u_charge::models::{Fleet, Shuttle};
/// use u_charge::simulation::Simulation;
///
/// let fleet = Fleet::new(vec![
///     Shuttle::new(1, 5, 0, 10),
///     Shuttle::new(2, 3, 0, 5),
///     Shuttle::new(3, 5, 2, 4),
/// ]).unwrap();
/// let rules = RuleEngine::default_policy();
///
/// let run = Simulation::new(&fleet, 1, &rules).unwrap().run();
/// assert_eq!(run.events.len(), 3);
/// assert!((run.average_wait() - 22.0 / 3.0).abs() < 1e-9);
/// ```
#[derive(Debug)]
pub struct Simulation<'a> {
    fleet: &'a Fleet,
    chargers: Vec<Charger>,
    queue: WaitingQueue<'a>,
    current_time: Time,
    next_unadmitted: usize,
    state: RunState,
    events: Vec<AssignmentEvent>,
    completions: HashMap<ShuttleId, Time>,
}

impl<'a> Simulation<'a> {
    /// Creates an idle run with `chargers` fresh chargers, all free at t=0.
    ///
    /// # Errors
    /// [`ChargeError::NoChargers`] if `chargers` is zero.
    pub fn new(fleet: &'a Fleet, chargers: usize, rules: &'a RuleEngine) -> Result<Self> {
        if chargers == 0 {
            return Err(ChargeError::NoChargers);
        }

        Ok(Self {
            fleet,
            chargers: (0..chargers).map(Charger::new).collect(),
            queue: WaitingQueue::new(rules),
            current_time: 0,
            next_unadmitted: 0,
            state: RunState::Idle,
            events: Vec::with_capacity(fleet.len()),
            completions: HashMap::with_capacity(fleet.len()),
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Simulated clock, in minutes.
    pub fn current_time(&self) -> Time {
        self.current_time
    }

    /// Chargers in id order.
    pub fn chargers(&self) -> &[Charger] {
        &self.chargers
    }

    /// Shuttles admitted but not yet assigned.
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Assignments recorded so far.
    pub fn events(&self) -> &[AssignmentEvent] {
        &self.events
    }

    /// Executes one admission/assignment/advance cycle.
    pub fn step(&mut self) -> RunState {
        if self.state == RunState::Done {
            return RunState::Done;
        }
        self.state = RunState::Running;

        self.admit_arrivals();
        self.assign_free_chargers();

        if self.all_assigned() {
            self.state = RunState::Done;
        } else {
            self.current_time = self.next_event_time();
        }
        self.state
    }

    /// Steps until done and returns the run outcome.
    pub fn run(mut self) -> SimulationRun {
        while self.step() != RunState::Done {}

        let kpi = RunKpi::calculate(self.fleet, &self.completions, &self.chargers);
        tracing::debug!(
            chargers = self.chargers.len(),
            average_wait = kpi.average_wait,
            makespan = kpi.makespan,
            "simulation finished"
        );

        SimulationRun {
            chargers: self.chargers.len(),
            events: self.events,
            completions: self.completions,
            kpi,
        }
    }

    fn all_assigned(&self) -> bool {
        self.next_unadmitted >= self.fleet.len() && self.queue.is_empty()
    }

    fn admit_arrivals(&mut self) {
        while let Some(shuttle) = self.fleet.get(self.next_unadmitted) {
            if shuttle.arrival > self.current_time {
                break;
            }
            self.queue.push(*shuttle);
            self.next_unadmitted += 1;
        }
    }

    fn assign_free_chargers(&mut self) {
        let now = self.current_time;
        for charger in &mut self.chargers {
            if self.queue.is_empty() {
                break;
            }
            if !charger.is_available(now) {
                continue;
            }
            let Some(shuttle) = self.queue.pop() else {
                break;
            };

            let completion = charger.assign(shuttle, now);
            let wait = shuttle.wait_if_started_at(now);
            self.completions.insert(shuttle.id, completion);
            self.events
                .push(AssignmentEvent::new(charger.id, shuttle.id, now, wait));

            tracing::debug!(
                charger = charger.id,
                shuttle = shuttle.id,
                time = now,
                wait,
                "charger takes shuttle"
            );
        }
    }

    fn next_event_time(&self) -> Time {
        let now = self.current_time;
        let next_completion = self
            .chargers
            .iter()
            .filter(|c| !c.is_available(now))
            .map(|c| c.available_time)
            .min();
        let next_arrival = self.fleet.get(self.next_unadmitted).map(|s| s.arrival);

        match (next_completion, next_arrival) {
            (Some(c), Some(a)) => c.min(a),
            (Some(t), None) | (None, Some(t)) => t,
            (None, None) => {
                tracing::warn!(time = now, "no pending event; advancing one minute");
                now + 1
            }
        }
    }
}

/// Runs a complete simulation with `chargers` chargers.
pub fn simulate(fleet: &Fleet, chargers: usize, rules: &RuleEngine) -> Result<SimulationRun> {
    Ok(Simulation::new(fleet, chargers, rules)?.run())
}
