//! `bl-inflow`: when new cyclists enter the path.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`profile`]   | `DemandProfile`, `InflowPolicy`                           |
//! | [`generator`] | `InflowGenerator`: profile + policy → admission steps    |
//! | [`queue`]     | `InflowQueue` (sorted admission steps with a cursor)      |
//! | [`loader`]    | `load_demand_csv`, `load_demand_reader`                   |
//! | [`error`]     | `InflowError`, `InflowResult<T>`                          |
//!
//! # Interval model (summary)
//!
//! The run's `T` steps are split into `n = demand.len()` equal intervals of
//! `T / n` steps.  Interval `i` covers steps `[i·T/n, (i+1)·T/n)` and should
//! admit about `demand[i]` cyclists:
//!
//! ```text
//! fixed       every (T/n) / demand[i] steps, starting at the interval start
//! stochastic  each step independently with probability demand[i] / (T/n)
//! ```

pub mod error;
pub mod generator;
pub mod loader;
pub mod profile;
pub mod queue;

#[cfg(test)]
mod tests;

pub use error::{InflowError, InflowResult};
pub use generator::InflowGenerator;
pub use loader::{load_demand_csv, load_demand_reader};
pub use profile::{DemandProfile, InflowPolicy};
pub use queue::InflowQueue;
