//! A no-op behavior model: agents coast straight ahead.

use crate::{BehaviorModel, BehaviorResult, Decision, SimContext};

/// A [`BehaviorModel`] that keeps every agent at its current speed and
/// lateral position.
///
/// Useful in tests that exercise the tick loop's bookkeeping (admission,
/// exit, recording) without the interaction model.
pub struct NoopBehavior;

impl BehaviorModel for NoopBehavior {
    fn decide(&self, slot: usize, ctx: &SimContext<'_>) -> BehaviorResult<Decision> {
        let me = ctx.agent(slot)?;
        Ok(Decision::coast(me.pos().y))
    }
}
