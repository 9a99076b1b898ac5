//! The output of one agent's decide phase.

use bl_core::AgentTag;

/// What an agent will do during the commit phase of the current tick.
///
/// Decisions are computed from the previous tick's committed state only and
/// applied all at once after every agent has decided.  The leader is a
/// lookup handle valid for this tick; it is never stored on the agent.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Decision {
    /// Longitudinal acceleration (m/s²).  The commit phase may raise it so
    /// speed does not drop below zero.
    pub acceleration: f64,

    /// Lateral speed for this step (m/s, left positive).
    pub lateral_speed: f64,

    /// Lateral position the agent is heading for.
    pub desired_lateral: f64,

    /// Agent being followed, if any.
    pub leader: Option<AgentTag>,

    /// A look-back or feasibility clamp overrode the intended lateral move.
    pub cut_off: bool,

    /// At least one significantly slower agent was in the consideration
    /// range, so the agent is routing around it.
    pub overtaking: bool,
}

impl Decision {
    /// Zero acceleration and zero lateral speed: keep the current speed
    /// and lateral position.  A static obstacle's speed is zero, so for it
    /// this means no motion.
    pub fn coast(lateral: f64) -> Self {
        Self {
            acceleration:    0.0,
            lateral_speed:   0.0,
            desired_lateral: lateral,
            leader:          None,
            cut_off:         false,
            overtaking:      false,
        }
    }
}
