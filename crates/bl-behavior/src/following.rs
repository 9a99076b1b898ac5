//! Level 3: longitudinal acceleration (the NDM car-following law).
//!
//! ```text
//! free      = (v0 - v) / a_des                    no leader, or headway > d
//!           = 0                                   headway ≤ d
//! dec1      = min(Δv² / (2 (s - L)), b_max)       Δv > 0, s > L
//!           = b_max                               Δv > 0, s ≤ L
//! dec2      = b_max (s - d)² / (L - d)²           Δv ≤ 1, s ≤ d
//! a         = free - min(dec1 + dec2, b_max)
//! ```
//!
//! with headway `s` between centres, `Δv = v - v_leader`, body length `L`
//! and safety distance `d = sr_length + L / 2`.

use bl_agent::AgentRef;

use crate::error::{finite_own, finite_pair};
use crate::BehaviorResult;

/// The terms of one acceleration decision.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct FollowingTerms {
    /// Free-flow acceleration (zero inside the safety distance).
    pub free: f64,
    /// Speed-matching deceleration.
    pub dec1: f64,
    /// Safety-distance deceleration.
    pub dec2: f64,
    /// `free - min(dec1 + dec2, b_max)`.
    pub acceleration: f64,
}

/// Acceleration of `me` following `leader` (or riding freely).
pub fn acceleration(me: AgentRef<'_>, leader: Option<AgentRef<'_>>) -> BehaviorResult<FollowingTerms> {
    let p = me.params;
    let v = me.speed();
    let free_flow = finite_own((p.v0 - v) / p.a_des, me.tag, "free-flow acceleration")?;

    let Some(leader) = leader else {
        return Ok(FollowingTerms { free: free_flow, acceleration: free_flow, ..Default::default() });
    };

    let headway = finite_pair(leader.pos().x - me.pos().x, me.tag, leader.tag, "headway")?;
    let delta_v = finite_pair(v - leader.speed(), me.tag, leader.tag, "relative speed")?;
    let safety = me.kinematics.geometry.sr_length + p.length / 2.0;

    let free = if headway <= safety { 0.0 } else { free_flow };

    let dec1 = if delta_v <= 0.0 {
        0.0
    } else if headway > p.length {
        (delta_v * delta_v / (2.0 * (headway - p.length))).min(p.b_max)
    } else {
        p.b_max
    };

    let dec2 = if delta_v <= 1.0 && headway <= safety {
        let reach = p.length - safety;
        let dec = p.b_max / (reach * reach) * (headway - safety).powi(2);
        // `min` below would hide a NaN here.
        finite_pair(dec, me.tag, leader.tag, "safety-distance deceleration")?
    } else {
        0.0
    };

    let acceleration = finite_pair(
        free - (dec1 + dec2).min(p.b_max),
        me.tag,
        leader.tag,
        "acceleration",
    )?;
    Ok(FollowingTerms { free, dec1, dec2, acceleration })
}
