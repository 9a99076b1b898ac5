//! Read-only simulation state passed to every decision.

use bl_agent::{AgentRef, AgentStore};
use bl_core::{PathConfig, Tick};
use bl_spatial::SpatialIndex;

use crate::{BehaviorError, BehaviorResult};

/// A read-only snapshot of the simulation state passed to every
/// [`BehaviorModel`][crate::BehaviorModel] call.
///
/// `SimContext` is built once per tick by bl-sim and shared (immutably)
/// across all decisions of that tick.  Every agent therefore sees the state
/// committed at the end of the previous tick, never a neighbour's
/// in-progress decision.
///
/// # Lifetimes
///
/// All borrows live for the duration of one tick's decide phase.  bl-sim
/// never allows mutable access to these structures while `SimContext` is
/// live.
pub struct SimContext<'a> {
    /// Tick being decided.
    pub tick: Tick,

    /// Simulated seconds per tick.
    pub step_secs: f64,

    /// Path geometry (lateral extent, gap-search edges).
    pub path: &'a PathConfig,

    /// Read-only view of every agent's SoA state arrays.
    pub agents: &'a AgentStore,

    /// Neighbour index over `agents`, rebuilt after the last commit.
    pub index: &'a SpatialIndex,
}

impl<'a> SimContext<'a> {
    #[inline]
    pub fn new(
        tick:      Tick,
        step_secs: f64,
        path:      &'a PathConfig,
        agents:    &'a AgentStore,
        index:     &'a SpatialIndex,
    ) -> Self {
        Self { tick, step_secs, path, agents, index }
    }

    /// The agent in `slot`, or an error if the slot does not exist.
    pub fn agent(&self, slot: usize) -> BehaviorResult<AgentRef<'a>> {
        if slot < self.agents.len() {
            Ok(self.agents.get(slot))
        } else {
            Err(BehaviorError::SlotOutOfRange { slot, len: self.agents.len() })
        }
    }

    /// Every other agent within `radius` of the agent in `slot`, in slot
    /// order.  The agent itself is excluded.
    pub fn neighbors_of(&self, slot: usize, radius: f64) -> BehaviorResult<Vec<AgentRef<'a>>> {
        let me = self.agent(slot)?;
        self.index
            .neighbors(me.pos(), radius)?
            .into_iter()
            .filter(|&s| s != slot)
            .map(|s| self.agent(s))
            .collect()
    }
}
