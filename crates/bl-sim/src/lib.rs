//! `bl-sim`: tick loop orchestrator for the rust_bikelane simulator.
//!
//! # Two-phase tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks():
//!   ① Decide:  BehaviorModel::decide for every cyclist, reading only the
//!              state committed last tick (parallel with `parallel`).
//!   ② Commit:  each cyclist applies its own decision, in slot order.
//!   ③ Admit:   at most one new cyclist at x = 0 if the inflow queue says so.
//!   ④ Record:  clock advances; observers get a snapshot (steps start at 1).
//!   ⑤ Remove:  cyclists with x ≥ path length leave; index is rebuilt.
//! ```
//!
//! No decision can observe another agent's state from the same tick, so the
//! order in which agents are visited has no influence on the result.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the decide phase on Rayon's thread pool.          |
//! | `fx-hash`  | FxHash for the agent store's tag lookup table.         |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use bl_behavior::CyclistBehavior;
//! use bl_core::SimConfig;
//! use bl_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::default(), CyclistBehavior::new()).build()?;
//! sim.run(&mut NoopObserver)?;
//! println!("{}", sim.counters);
//! ```

pub mod builder;
pub mod counters;
pub mod error;
pub mod observer;
pub mod sim;


pub use builder::SimBuilder;
pub use counters::SimCounters;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, TickStats};
pub use sim::Sim;
