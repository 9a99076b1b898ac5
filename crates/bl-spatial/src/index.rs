//! Neighbour index over agent positions.
//!
//! # Periodic longitudinal axis
//!
//! Positions are stored once, at their raw `x`.  A query disc that crosses
//! `x = 0` or `x = period` is repeated with its centre shifted by `±period`
//! so that agents near the far end of the domain are found through the
//! wrap.  The lateral axis is bounded and never wraps.
//!
//! # Consistency
//!
//! The index holds slot numbers, not agents.  Slots shift whenever the
//! store removes agents, and positions change every commit, so the owner
//! calls [`rebuild`](SpatialIndex::rebuild) after any such change.  At the
//! agent counts this simulator sees (tens to low hundreds) a bulk load per
//! tick costs less than tracking individual moves.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use bl_core::Position;

use crate::{SpatialError, SpatialResult};

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: an `[x, y]` point with the agent's store slot.
#[derive(Clone, Debug)]
struct SlotEntry {
    point: [f64; 2], // [x, y]
    slot:  usize,
}

impl RTreeObject for SlotEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for SlotEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── SpatialIndex ──────────────────────────────────────────────────────────────

/// Radius queries over the positions of all agents on the path.
pub struct SpatialIndex {
    period: f64,
    tree:   RTree<SlotEntry>,
}

impl SpatialIndex {
    /// An empty index over a longitudinal domain of circumference `period`.
    pub fn new(period: f64) -> SpatialResult<Self> {
        if !period.is_finite() || period <= 0.0 {
            return Err(SpatialError::InvalidPeriod(period));
        }
        Ok(Self { period, tree: RTree::new() })
    }

    /// Circumference of the longitudinal axis.
    #[inline]
    pub fn period(&self) -> f64 {
        self.period
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Replace the indexed set with `positions`, where item `i` is the
    /// position of store slot `i`.
    ///
    /// Rejects non-finite coordinates; on error the previous contents are
    /// kept.
    pub fn rebuild<I>(&mut self, positions: I) -> SpatialResult<()>
    where
        I: IntoIterator<Item = Position>,
    {
        let entries = positions
            .into_iter()
            .enumerate()
            .map(|(slot, pos)| {
                if pos.is_finite() {
                    Ok(SlotEntry { point: [pos.x, pos.y], slot })
                } else {
                    Err(SpatialError::NonFinitePosition { slot, pos })
                }
            })
            .collect::<SpatialResult<Vec<_>>>()?;
        self.tree = RTree::bulk_load(entries);
        Ok(())
    }

    /// Slots of every agent within Euclidean distance `radius` of `pos`,
    /// measured with the longitudinal axis wrapped.
    ///
    /// The result is sorted by slot and contains each slot once.  An agent
    /// located exactly at `pos` (including the caller itself) is included;
    /// filtering it out is left to the caller.
    pub fn neighbors(&self, pos: Position, radius: f64) -> SpatialResult<Vec<usize>> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(SpatialError::InvalidRadius(radius));
        }
        let r2 = radius * radius;

        let mut found: Vec<usize> = self.within(pos.x, pos.y, r2).collect();
        if pos.x - radius < 0.0 {
            found.extend(self.within(pos.x + self.period, pos.y, r2));
        }
        if pos.x + radius > self.period {
            found.extend(self.within(pos.x - self.period, pos.y, r2));
        }
        found.sort_unstable();
        found.dedup();
        Ok(found)
    }

    fn within(&self, x: f64, y: f64, r2: f64) -> impl Iterator<Item = usize> + '_ {
        self.tree
            .locate_within_distance([x, y], r2)
            .map(|e| e.slot)
    }
}
