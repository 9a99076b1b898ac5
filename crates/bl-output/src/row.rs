//! Plain data row types written by output backends.

use bl_agent::AgentRef;

/// One cyclist at one step: a row of the trajectory dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryRow {
    /// Completed steps, starting at 1.
    pub step:          u64,
    pub agent_id:      u32,
    pub x:             f64,
    pub y:             f64,
    pub speed:         f64,
    pub lateral_speed: f64,
    pub desired_speed: f64,
    pub sr_length:     f64,
    pub sr_width:      f64,
    pub cr_length:     f64,
}

impl TrajectoryRow {
    /// Row for `agent` at `step`, or `None` for a static obstacle.
    pub fn from_agent(step: u64, agent: AgentRef<'_>) -> Option<Self> {
        let id = agent.tag.cyclist()?;
        let k = agent.kinematics;
        Some(Self {
            step,
            agent_id:      id.0,
            x:             k.pos.x,
            y:             k.pos.y,
            speed:         k.speed,
            lateral_speed: k.lateral_speed,
            desired_speed: agent.params.v0,
            sr_length:     k.geometry.sr_length,
            sr_width:      k.geometry.sr_width,
            cr_length:     k.geometry.cr_length,
        })
    }
}

/// Summary statistics for one simulation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub step:      u64,
    /// Simulated seconds at the end of the step.
    pub time_secs: f64,
    pub active:    u64,
    pub admitted:  u64,
    pub exited:    u64,
}
