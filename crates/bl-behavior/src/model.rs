//! The `BehaviorModel` trait: the decision seam between agents and the
//! tick loop.

use crate::{BehaviorResult, Decision, SimContext};

/// Pluggable per-agent decision logic.
///
/// # Thread safety
///
/// The simulation loop may call `decide` for many agents in parallel via
/// Rayon, so implementations must be `Send + Sync`.  State that varies per
/// agent lives in `AgentStore` (accessed read-only through `ctx.agents`),
/// not in the model itself.
///
/// # Static agents
///
/// bl-sim never asks a model to decide for a static obstacle; it uses
/// [`Decision::coast`] directly.
pub trait BehaviorModel: Send + Sync + 'static {
    /// Decide what the agent in `slot` does this tick.
    fn decide(&self, slot: usize, ctx: &SimContext<'_>) -> BehaviorResult<Decision>;
}
