//! Level 1: desired lateral position.
//!
//! Each category-1 agent blocks the lateral band `[y - w/2, y + w/2]`, where
//! `w` is the *deciding* cyclist's body width.  The free space between the
//! gap-search edges is scanned from the left (high `y`) to the right, and
//! the first gap at least `2 * sr_width` wide is taken.  The cyclist aims
//! for that gap's right-hand edge plus its safety half-width.
//!
//! When no gap fits, the blocker furthest downstream is the least urgent
//! and is dropped from consideration before scanning again.  If every
//! blocker is dropped the cyclist falls back to its preferred offset `p`.

use bl_agent::AgentRef;
use bl_core::{AgentTag, PathConfig};

/// Slack when comparing a gap's width with the required width, so a gap of
/// exactly `2 * sr_width` is accepted despite rounding.
pub const GAP_TOLERANCE: f64 = 1e-9;

/// A category-1 agent projected onto the lateral axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Blocker {
    pub slot:  usize,
    pub tag:   AgentTag,
    pub x:     f64,
    pub y:     f64,
    pub speed: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Outcome of level 1.
#[derive(Clone, Debug, PartialEq)]
pub struct LateralChoice {
    /// Lateral position to steer towards.
    pub desired: f64,
    /// Whether any category-1 agent was present.
    pub overtaking: bool,
    /// Blockers still considered when the gap was found, sorted by upper
    /// edge, highest first.  Level 2 checks these for obstruction.
    pub blockers: Vec<Blocker>,
}

/// Right-hand (low `y`) edge of the first gap of width at least `need`,
/// scanning from `left` down to `right`.
///
/// `spans` are `(lower, upper)` blocked intervals sorted by `upper`,
/// highest first.  Overlapping and nested spans are allowed.
pub fn find_gap<I>(spans: I, left: f64, right: f64, need: f64) -> Option<f64>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let fits = |hi: f64, lo: f64| hi - lo + GAP_TOLERANCE >= need;

    // Lowest point reached so far by any blocked span; everything between
    // it and `left` is blocked or already examined.
    let mut free_top = left;
    for (lower, upper) in spans {
        let edge = upper.max(right);
        if fits(free_top, edge) {
            return Some(edge);
        }
        free_top = free_top.min(lower);
        if free_top <= right {
            return None;
        }
    }
    fits(free_top, right).then_some(right)
}

/// Choose the desired lateral position of `me` given its category-1
/// neighbours.
pub fn choose_lateral(me: AgentRef<'_>, cat1: &[AgentRef<'_>], path: &PathConfig) -> LateralChoice {
    if cat1.is_empty() {
        return LateralChoice { desired: me.params.p, overtaking: false, blockers: Vec::new() };
    }

    let half = me.params.width / 2.0;
    let sr_width = me.kinematics.geometry.sr_width;
    let need = 2.0 * sr_width;

    let mut blockers: Vec<Blocker> = cat1
        .iter()
        .map(|o| {
            let pos = o.pos();
            Blocker {
                slot:  o.slot,
                tag:   o.tag,
                x:     pos.x,
                y:     pos.y,
                speed: o.speed(),
                lower: pos.y - half,
                upper: pos.y + half,
            }
        })
        .collect();
    blockers.sort_by(|a, b| b.upper.total_cmp(&a.upper));

    let desired = loop {
        if blockers.is_empty() {
            break me.params.p;
        }
        let spans = blockers.iter().map(|b| (b.lower, b.upper));
        if let Some(edge) = find_gap(spans, path.gap_left_edge(), path.gap_right_edge(), need) {
            break edge + sr_width;
        }
        let furthest = furthest_downstream(&blockers);
        blockers.remove(furthest);
    };

    LateralChoice { desired, overtaking: true, blockers }
}

/// Index of the blocker with the largest `x`; the first one on ties.
fn furthest_downstream(blockers: &[Blocker]) -> usize {
    let mut best = 0;
    for (i, b) in blockers.iter().enumerate().skip(1) {
        if b.x > blockers[best].x {
            best = i;
        }
    }
    best
}
