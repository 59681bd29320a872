//! Charger capacity planning for the U-Engine ecosystem.
//!
//! Determines the minimum number of identical chargers needed so that a fleet
//! of shuttles, each with a priority, arrival time, and charging duration,
//! waits on average no longer than a given threshold.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Shuttle`, `Fleet`, `Charger`, `AssignmentEvent`
//! - **`dispatching`**: Dispatching rules, `RuleEngine`, and the `WaitingQueue`
//! - **`simulation`**: Discrete-event engine (`Simulation`) and run KPIs
//! - **`search`**: Minimum-charger search (`CapacitySearch`)
//! - **`validation`**: Input integrity checks (duplicate IDs, time domains)
//! - **`input`**: Text loader for shuttle lists
//! - **`generator`**: Seeded random fleets
//!
//! # Example
//!
//! ```
//! use u_charge::input::parse_fleet;
//! use u_charge::search::min_chargers;
//!
//! let fleet = parse_fleet("3\n1 5 0 10\n2 3 0 5\n3 5 2 4\n").unwrap();
//! let outcome = min_chargers(&fleet, 1.0).unwrap();
//! assert_eq!(outcome.chargers, 2);
//! ```
//!
//! # References
//!
//! - Kleinrock (1976), "Queueing Systems, Volume II", Ch. 3 (priority queueing)
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4

pub mod dispatching;
pub mod error;
pub mod generator;
pub mod input;
pub mod models;
pub mod search;
pub mod simulation;
pub mod validation;

pub use error::{ChargeError, Result};
