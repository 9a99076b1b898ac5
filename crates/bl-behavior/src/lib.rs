//! `bl-behavior`: cyclist decision model and the read-only tick context.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                 |
//! |------------------|----------------------------------------------------------|
//! | [`context`]      | `SimContext<'a>`: read-only tick snapshot               |
//! | [`decision`]     | `Decision`: what an agent does in the commit phase      |
//! | [`model`]        | `BehaviorModel` trait                                    |
//! | [`surroundings`] | neighbour categories (cat. 1, cat. 1+2, behind, alongside) |
//! | [`lateral`]      | level 1: gap search, desired lateral position            |
//! | [`trajectory`]   | level 2: lateral speed, look-back, clamps, leader        |
//! | [`following`]    | level 3: NDM acceleration                                |
//! | [`cyclist`]      | `CyclistBehavior`: levels 1–3 combined                  |
//! | [`noop`]         | `NoopBehavior`: agents coast straight ahead             |
//! | [`error`]        | `BehaviorError`, `BehaviorResult<T>`                     |
//!
//! # Design notes
//!
//! The two-phase tick loop in bl-sim works as follows:
//!
//! 1. **Decide phase** (parallel with the `parallel` feature): call
//!    `BehaviorModel::decide` for every mobile agent.  All reads go through
//!    `&SimContext`; no mutation.
//!
//! 2. **Commit phase** (sequential, slot order): apply every `Decision` to
//!    the agent's own kinematic state.
//!
//! This split means no agent ever observes another agent's decision for
//! the same tick, and `BehaviorModel` only needs to be `Send + Sync`.

pub mod context;
pub mod cyclist;
pub mod decision;
pub mod error;
pub mod following;
pub mod lateral;
pub mod model;
pub mod noop;
pub mod surroundings;
pub mod trajectory;


pub use context::SimContext;
pub use cyclist::CyclistBehavior;
pub use decision::Decision;
pub use error::{BehaviorError, BehaviorResult};
pub use following::FollowingTerms;
pub use lateral::{find_gap, LateralChoice};
pub use model::BehaviorModel;
pub use noop::NoopBehavior;
pub use trajectory::Trajectory;
