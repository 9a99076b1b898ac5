//! Neighbour classification around a deciding cyclist.
//!
//! Longitudinal comparisons use raw `x` coordinates.  The index query wraps
//! around the periodic domain, but an agent that is only close through the
//! wrap is never "ahead" or "behind" in these filters.

use bl_agent::AgentRef;

/// Added to the consideration range when querying the index so the circular
/// query covers the rectangular range at every lateral offset.
pub const QUERY_MARGIN: f64 = 10.0;

/// How far back a cyclist looks for faster riders (m).
pub const LOOK_BACK_RANGE: f64 = 20.0;

/// Below this speed (m/s) a cyclist neither looks back nor widens its leader
/// corridor with distance.
pub const MIN_MANOEUVRE_SPEED: f64 = 0.5;

/// Query radius for the forward neighbourhood of `me`.
#[inline]
pub fn query_radius(me: AgentRef<'_>) -> f64 {
    me.kinematics.geometry.cr_length + QUERY_MARGIN
}

/// Agents strictly ahead and strictly inside the consideration range.
pub fn in_consideration_range<'a>(
    me:     AgentRef<'_>,
    nearby: &[AgentRef<'a>],
) -> impl Iterator<Item = AgentRef<'a>> {
    let x = me.pos().x;
    let cr = me.kinematics.geometry.cr_length;
    nearby
        .iter()
        .copied()
        .filter(move |o| o.pos().x > x && o.pos().x < x + cr)
}

/// Category 1: agents in the consideration range at or below the passing
/// threshold.  These are routed around.
pub fn category1<'a>(me: AgentRef<'_>, nearby: &[AgentRef<'a>]) -> Vec<AgentRef<'a>> {
    let threshold = me.params.passing_threshold();
    in_consideration_range(me, nearby)
        .filter(|o| o.speed() <= threshold)
        .collect()
}

/// Categories 1 and 2: agents in the consideration range no faster than
/// `me`'s desired speed.  Leader candidates.
pub fn category12<'a>(me: AgentRef<'_>, nearby: &[AgentRef<'a>]) -> Vec<AgentRef<'a>> {
    let v0 = me.params.v0;
    in_consideration_range(me, nearby)
        .filter(|o| o.speed() <= v0)
        .collect()
}

/// Agents from level with `me` to the end of its safety region, where a
/// lateral move could cause a side collision.
pub fn lateral_zone<'a>(me: AgentRef<'_>, nearby: &[AgentRef<'a>]) -> Vec<AgentRef<'a>> {
    let x = me.pos().x;
    let sr = me.kinematics.geometry.sr_length;
    nearby
        .iter()
        .copied()
        .filter(|o| o.pos().x >= x && o.pos().x < x + sr)
        .collect()
}

/// Agents behind `me` within [`LOOK_BACK_RANGE`] that are currently faster.
pub fn faster_behind<'a>(me: AgentRef<'_>, behind: &[AgentRef<'a>]) -> Vec<AgentRef<'a>> {
    let x = me.pos().x;
    let v = me.speed();
    behind
        .iter()
        .copied()
        .filter(|o| o.pos().x < x && o.pos().x > x - LOOK_BACK_RANGE && o.speed() > v)
        .collect()
}
