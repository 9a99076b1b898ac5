//! `bl-core`: foundational types for the `rust_bikelane` simulator.
//!
//! This crate is a dependency of every other `bl-*` crate.  It has no `bl-*`
//! dependencies and minimal external ones (`rand`, `rand_distr`,
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`ids`]    | `AgentId`, `ObstacleId`, `AgentTag`, `AgentKind`           |
//! | [`geo`]    | `Position` on the path                                     |
//! | [`path`]   | `PathConfig`, `Bottleneck`                                 |
//! | [`time`]   | `Tick`, `SimClock`, `SimConfig`                            |
//! | [`rng`]    | `AgentRng` (per-cyclist), `SimRng` (global)                |
//! | [`error`]  | `BlError`, `BlResult`                                      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public config types. |

pub mod error;
pub mod geo;
pub mod ids;
pub mod path;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{BlError, BlResult};
pub use geo::Position;
pub use ids::{AgentId, AgentKind, AgentTag, ObstacleId};
pub use path::{Bottleneck, PathConfig};
pub use rng::{AgentRng, SimRng};
pub use time::{SimClock, SimConfig, Tick};
