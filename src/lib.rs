//! Monte Carlo inventory risk for vending machines.
//!
//! Two simulations share one demand model:
//!
//! - the **cycle** simulation sums daily demand over the days between
//!   service visits and reports how often a single item outruns the stock
//!   left after lead-time sales;
//! - the **fleet race** depletes every slot of a machine at once and reports
//!   how many days pass before a given number of items run dry, raced
//!   against a cumulative demand threshold.
//!
//! Daily demand is Poisson when the item's variance doesn't exceed its
//! mean, and a method-of-moments negative binomial when it does.

pub mod demand;
pub mod error;
pub mod io;
pub mod model;
pub mod simulation;

pub use error::{ConfigError, SimulationError};
