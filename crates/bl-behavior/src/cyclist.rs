//! The three-level cyclist model.

use log::{debug, trace};

use bl_core::AgentTag;

use crate::error::finite_own;
use crate::following;
use crate::lateral::choose_lateral;
use crate::surroundings::{self, query_radius};
use crate::trajectory::plan_trajectory;
use crate::{BehaviorModel, BehaviorResult, Decision, SimContext};

/// Cyclist decision model: desired lateral position (level 1), lateral
/// speed and leader (level 2), acceleration (level 3).
///
/// Set [`trace`](Self::trace) to log every step of one cyclist's decisions
/// at `debug` level.
#[derive(Clone, Debug, Default)]
pub struct CyclistBehavior {
    pub trace: Option<AgentTag>,
}

impl CyclistBehavior {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log the decisions of `agent` in detail.
    pub fn tracing(agent: AgentTag) -> Self {
        Self { trace: Some(agent) }
    }
}

impl BehaviorModel for CyclistBehavior {
    fn decide(&self, slot: usize, ctx: &SimContext<'_>) -> BehaviorResult<Decision> {
        let me = ctx.agent(slot)?;
        if me.tag.is_static() {
            return Ok(Decision::coast(me.pos().y));
        }
        let traced = self.trace == Some(me.tag);

        let nearby = ctx.neighbors_of(slot, query_radius(me))?;

        // ── Level 1: desired lateral position ─────────────────────────────
        let cat1 = surroundings::category1(me, &nearby);
        let choice = choose_lateral(me, &cat1, ctx.path);
        if traced {
            let ids: Vec<String> = cat1.iter().map(|o| o.tag.to_string()).collect();
            debug!(
                "{} {}: v={:.2} v0={:.2} p={:.2} at {}; cat1 [{}], desired lateral {:.2}",
                ctx.tick, me.tag, me.speed(), me.params.v0, me.params.p, me.pos(),
                ids.join(", "), choice.desired,
            );
        }

        // ── Level 2: lateral speed and leader ─────────────────────────────
        let traj = plan_trajectory(me, &choice, &nearby, ctx)?;
        let leader = traj.leader.map(|s| ctx.agent(s)).transpose()?;
        if traced {
            let cap = me.params.lateral_speed_cap(me.speed());
            debug!(
                "{} {}: intended lateral {:.3}, applied {:.3} (cap {:.2}, prev {:.3}), \
                 cut_off={}, restricted={}, heading {:.4}, leader {}",
                ctx.tick, me.tag, traj.intended, traj.lateral_speed, cap,
                me.kinematics.lateral_speed, traj.cut_off, traj.restricted,
                heading_ratio(traj.lateral_speed, me.speed()),
                leader.map_or_else(|| "none".to_string(), |l| l.tag.to_string()),
            );
        }

        // ── Level 3: acceleration ─────────────────────────────────────────
        let terms = following::acceleration(me, leader)?;
        if traced {
            debug!(
                "{} {}: free {:.3}, dec1 {:.3}, dec2 {:.3} → acceleration {:.3}",
                ctx.tick, me.tag, terms.free, terms.dec1, terms.dec2, terms.acceleration,
            );
        }

        let lateral_speed = finite_own(traj.lateral_speed, me.tag, "lateral speed")?;
        trace!(
            "{} {}: a={:.3} v_lat={:.3} leader={:?}",
            ctx.tick, me.tag, terms.acceleration, lateral_speed, leader.map(|l| l.tag),
        );

        Ok(Decision {
            acceleration:    terms.acceleration,
            lateral_speed,
            desired_lateral: choice.desired,
            leader:          leader.map(|l| l.tag),
            cut_off:         traj.cut_off,
            overtaking:      choice.overtaking,
        })
    }
}

/// Lateral over longitudinal speed.  Zero for a (nearly) stationary rider,
/// whose heading is undefined.
pub fn heading_ratio(lateral: f64, speed: f64) -> f64 {
    if speed.abs() < f64::EPSILON { 0.0 } else { lateral / speed }
}
