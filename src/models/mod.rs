//! Charging domain models.
//!
//! Value types shared by the simulation engine and the capacity search.
//!
//! # Domain Mappings
//!
//! | u-charge | Queueing theory | Scheduling |
//! |----------|-----------------|------------|
//! | Shuttle | Customer | Job |
//! | Charger | Server | Machine |
//! | Fleet | Arrival stream | Job set |
//! | AssignmentEvent | Service start | Assignment |

mod charger;
mod event;
mod fleet;
mod shuttle;

pub use charger::Charger;
pub use event::AssignmentEvent;
pub use fleet::Fleet;
pub use shuttle::{Shuttle, ShuttleId, Time};
