use thiserror::Error;

use bl_core::AgentTag;
use bl_spatial::SpatialError;

#[derive(Debug, Error)]
pub enum BehaviorError {
    /// An intermediate quantity computed from two agents' states is NaN or
    /// infinite.
    #[error("non-finite {quantity} for agent {agent} with respect to {other}")]
    NonFinite {
        agent:    AgentTag,
        other:    AgentTag,
        quantity: &'static str,
    },

    /// A decision output computed from the agent's own state is NaN or
    /// infinite.
    #[error("non-finite {quantity} for agent {agent}")]
    NonFiniteOwn { agent: AgentTag, quantity: &'static str },

    #[error("slot {slot} is out of range for a store of {len} agents")]
    SlotOutOfRange { slot: usize, len: usize },

    #[error("neighbour query failed: {0}")]
    Spatial(#[from] SpatialError),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;

/// `Ok(value)` if finite, otherwise [`BehaviorError::NonFinite`].
#[inline]
pub(crate) fn finite_pair(
    value:    f64,
    agent:    AgentTag,
    other:    AgentTag,
    quantity: &'static str,
) -> BehaviorResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(BehaviorError::NonFinite { agent, other, quantity })
    }
}

/// `Ok(value)` if finite, otherwise [`BehaviorError::NonFiniteOwn`].
#[inline]
pub(crate) fn finite_own(value: f64, agent: AgentTag, quantity: &'static str) -> BehaviorResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(BehaviorError::NonFiniteOwn { agent, quantity })
    }
}
