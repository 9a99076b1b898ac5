//! Level 2: lateral speed and leader.
//!
//! Order of operations:
//!
//! 1. Intended lateral speed: straight to the desired position at the
//!    desired lateral speed, or steep enough to clear every obstructing
//!    category-1 agent by the time `me` draws level with it.
//! 2. Look-back: cancel the move if it would cut off a faster rider behind
//!    or if someone is alongside on that side.
//! 3. Feasibility: lateral acceleration bound, then the speed-dependent
//!    lateral speed cap.
//! 4. Leader: nearest slower agent ahead inside a corridor towards the
//!    desired position.
//! 5. Side-collision restriction, followed by the feasibility clamps again
//!    so the final value always respects them.

use bl_agent::AgentRef;

use crate::error::finite_pair;
use crate::lateral::{Blocker, LateralChoice};
use crate::surroundings::{self, LOOK_BACK_RANGE, MIN_MANOEUVRE_SPEED};
use crate::{BehaviorResult, SimContext};

/// Blockers more than this far (m) outside the band between the current and
/// desired lateral position do not obstruct the move.
pub const OBSTRUCTION_MARGIN: f64 = 1.0;

/// Outcome of level 2.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    /// Lateral speed to apply this step (m/s, left positive).
    pub lateral_speed: f64,
    /// Lateral speed after steps 1 and 2, before any clamp.
    pub intended: f64,
    /// A look-back check or a feasibility clamp overrode the intended move.
    pub cut_off: bool,
    /// Slot of the chosen leader.
    pub leader: Option<usize>,
    /// Slots of the category-1 agents treated as lateral obstructions.
    pub obstructing: Vec<usize>,
    /// The side-collision check lowered the lateral speed.
    pub restricted: bool,
}

/// Run level 2 for `me`.
///
/// `nearby` is the forward neighbourhood used for level 1 (radius
/// [`surroundings::query_radius`]), excluding `me`.
pub fn plan_trajectory<'a>(
    me:     AgentRef<'a>,
    choice: &LateralChoice,
    nearby: &[AgentRef<'a>],
    ctx:    &SimContext<'a>,
) -> BehaviorResult<Trajectory> {
    let p = me.params;
    let pos = me.pos();
    let speed = me.speed();
    let dt = ctx.step_secs;
    let required = choice.desired - pos.y;

    // ── 1. Intended lateral speed ─────────────────────────────────────────
    let obstructing: Vec<&Blocker> = choice
        .blockers
        .iter()
        .filter(|b| obstructs(b.y, pos.y, choice.desired, required))
        .collect();

    let mut lateral = if obstructing.is_empty() {
        towards(required, p.omega_des, dt)
    } else {
        let mut steepest = 0.0_f64;
        for b in &obstructing {
            steepest = steepest.max(passing_angle(me, b, required)?);
        }
        let v = speed * steepest.tan();
        if required < 0.0 { -v } else { v }
    };

    // ── 2. Look-back ──────────────────────────────────────────────────────
    let mut cut_off = false;
    if p.look_back && speed > MIN_MANOEUVRE_SPEED && would_cut_off(me, choice.desired, required, ctx)? {
        lateral = 0.0;
        cut_off = true;
    }
    let intended = lateral;

    // ── 3. Feasibility ────────────────────────────────────────────────────
    let cap = p.lateral_speed_cap(speed);
    let (clamped, bound) = feasible(lateral, me, cap, dt);
    lateral = clamped;
    cut_off |= bound;

    // ── 4. Leader ─────────────────────────────────────────────────────────
    let obstructing: Vec<usize> = obstructing.iter().map(|b| b.slot).collect();
    let leader = select_leader(me, nearby, &obstructing, cut_off, choice.desired, cap);

    // ── 5. Side-collision restriction ─────────────────────────────────────
    let mut restricted = false;
    if let Some(limit) = side_limit(me, nearby, lateral, dt) {
        if lateral.abs() > limit {
            lateral = limit.copysign(lateral);
            restricted = true;
            lateral = feasible(lateral, me, cap, dt).0;
        }
    }

    Ok(Trajectory { lateral_speed: lateral, intended, cut_off, leader, obstructing, restricted })
}

// ── Step 1 helpers ────────────────────────────────────────────────────────────

/// Whether a blocker at lateral position `oy` lies in the way of a move
/// from `y` to `desired`.
fn obstructs(oy: f64, y: f64, desired: f64, required: f64) -> bool {
    if required < 0.0 {
        !(oy > y + OBSTRUCTION_MARGIN || oy < desired - OBSTRUCTION_MARGIN)
    } else {
        !(oy < y - OBSTRUCTION_MARGIN || oy > desired + OBSTRUCTION_MARGIN)
    }
}

/// Lateral speed that covers `required` metres at `omega_des` without
/// overshooting within one step.
fn towards(required: f64, omega_des: f64, dt: f64) -> f64 {
    (required / dt).clamp(-omega_des, omega_des)
}

/// Absolute approach angle needed to pass `b` one body-plus-safety width
/// clear on the side of the move.
fn passing_angle(me: AgentRef<'_>, b: &Blocker, required: f64) -> BehaviorResult<f64> {
    let p = me.params;
    let pos = me.pos();
    let closing = p.v0 - b.speed;
    let time_to_pass = finite_pair((b.x - pos.x) / closing, me.tag, b.tag, "passing time")?;
    let dist_to_pass = p.v0 * time_to_pass;

    let clearance = p.width + me.kinematics.geometry.sr_width;
    let passing_point = if required < 0.0 { b.y - clearance } else { b.y + clearance };
    let angle = (passing_point - pos.y).atan2(dist_to_pass).abs();
    finite_pair(angle, me.tag, b.tag, "passing angle")
}

// ── Step 2 helpers ────────────────────────────────────────────────────────────

/// Whether a lateral move towards `desired` would cut off a faster rider
/// behind or collide with someone alongside.
fn would_cut_off(
    me:       AgentRef<'_>,
    desired:  f64,
    required: f64,
    ctx:      &SimContext<'_>,
) -> BehaviorResult<bool> {
    let p = me.params;
    let pos = me.pos();
    let speed = me.speed();
    let moving_right = required <= 0.0;

    let behind = ctx.neighbors_of(me.slot, LOOK_BACK_RANGE)?;
    for o in surroundings::faster_behind(me, &behind) {
        let oy = o.pos().y;
        let on_side = if moving_right {
            oy <= pos.y && oy > desired - p.width
        } else {
            oy > pos.y && oy < desired + p.width
        };
        if !on_side {
            continue;
        }
        let gap = (pos.x - o.pos().x) - p.length;
        if gap <= 0.0 {
            return Ok(true);
        }
        let dv = o.speed() - speed;
        let braking = finite_pair(dv * dv / (2.0 * gap), me.tag, o.tag, "look-back braking")?;
        if 2.0 * braking > p.b_max {
            return Ok(true);
        }
    }

    let alongside = ctx.neighbors_of(me.slot, p.length)?;
    let blocked = alongside.iter().any(|o| {
        let oy = o.pos().y;
        if moving_right { oy < pos.y } else { oy > pos.y }
    });
    Ok(blocked)
}

// ── Step 3 helper ─────────────────────────────────────────────────────────────

/// Clamp `lateral` to the acceleration bound around the last committed
/// lateral speed, then to `±cap`.  Returns the clamped value and whether
/// any bound was active.
fn feasible(lateral: f64, me: AgentRef<'_>, cap: f64, dt: f64) -> (f64, bool) {
    let prev = me.kinematics.lateral_speed;
    let step = me.params.d_omega_max * dt;
    let mut v = lateral;
    let mut bound = false;

    if v > prev + step {
        v = prev + step;
        bound = true;
    }
    if v < prev - step {
        v = prev - step;
        bound = true;
    }
    if v > cap {
        v = cap;
        bound = true;
    }
    if v < -cap {
        v = -cap;
        bound = true;
    }
    (v, bound)
}

// ── Step 4 helper ─────────────────────────────────────────────────────────────

/// Nearest leader candidate inside the corridor towards `desired`.
fn select_leader(
    me:          AgentRef<'_>,
    nearby:      &[AgentRef<'_>],
    obstructing: &[usize],
    cut_off:     bool,
    desired:     f64,
    cap:         f64,
) -> Option<usize> {
    let pos = me.pos();
    let speed = me.speed();
    let w = me.params.width;
    let moving_left = desired - pos.y >= 0.0;
    let widening = speed > MIN_MANOEUVRE_SPEED;

    let mut best: Option<(usize, f64)> = None;
    for o in surroundings::category12(me, nearby) {
        if !cut_off && obstructing.contains(&o.slot) {
            continue;
        }
        let (ox, oy) = (o.pos().x, o.pos().y);
        let spread = if widening { cap / speed * (ox - pos.x) } else { 0.0 };
        let inside = if moving_left {
            oy >= pos.y - w && oy <= desired + w && (!widening || oy <= pos.y + w + spread)
        } else {
            oy <= pos.y + w && oy >= desired - w && (!widening || oy >= pos.y - w - spread)
        };
        if inside && best.is_none_or(|(_, bx)| ox < bx) {
            best = Some((o.slot, ox));
        }
    }
    best.map(|(slot, _)| slot)
}

// ── Step 5 helper ─────────────────────────────────────────────────────────────

/// Largest lateral speed magnitude that keeps `me`'s safety region from
/// reaching an agent alongside within one step, or `None` if nobody is
/// alongside on the side of `lateral`.
fn side_limit(me: AgentRef<'_>, nearby: &[AgentRef<'_>], lateral: f64, dt: f64) -> Option<f64> {
    let y = me.pos().y;
    let sr_width = me.kinematics.geometry.sr_width;
    let mut limit: Option<f64> = None;
    for o in surroundings::lateral_zone(me, nearby) {
        let dy = o.pos().y - y;
        if dy * lateral <= 0.0 {
            continue;
        }
        let gap = dy.abs() - sr_width;
        if gap <= 0.0 {
            return Some(0.0);
        }
        let l = gap / dt;
        limit = Some(limit.map_or(l, |cur: f64| cur.min(l)));
    }
    limit
}
