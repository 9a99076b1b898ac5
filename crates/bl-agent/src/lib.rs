//! `bl-agent`: cyclist parameters, kinematics, and agent storage.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`calibration`] | `Calibration`: run-wide model constants and draw ranges  |
//! | [`params`]      | `CyclistParams`: one cyclist's fixed attributes          |
//! | [`state`]       | `Kinematics`, `Geometry`: mutable per-step state         |
//! | [`store`]       | `AgentStore` (SoA arrays, tag → slot lookup)              |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                   |
//! |-----------|----------------------------------------------------------|
//! | `fx-hash` | FxHash for the tag → slot table.                         |
//! | `serde`   | Derives `Serialize`/`Deserialize` on `Calibration`.      |

pub mod calibration;
pub mod params;
pub mod state;
pub mod store;

#[cfg(test)]
mod tests;

pub use calibration::Calibration;
pub use params::CyclistParams;
pub use state::{Geometry, Kinematics};
pub use store::{AgentRef, AgentStore};
