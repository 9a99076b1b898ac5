//! `InflowQueue`: the precomputed admission steps of a run.
//!
//! Built once before the first tick.  The simulation asks
//! [`take_due`](InflowQueue::take_due) every tick; a cursor walks the sorted
//! step list so each query is O(1) amortised.

use bl_core::Tick;

/// Sorted, duplicate-free admission steps with a read cursor.
#[derive(Clone, Debug, Default)]
pub struct InflowQueue {
    ticks:  Vec<Tick>,
    cursor: usize,
}

impl InflowQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from admission steps in any order.  Duplicates collapse into
    /// one admission since at most one cyclist enters per step.
    pub fn from_ticks(mut ticks: Vec<Tick>) -> Self {
        ticks.sort_unstable();
        ticks.dedup();
        Self { ticks, cursor: 0 }
    }

    /// `true` if a cyclist is due at `tick`; advances past it if so.
    ///
    /// Steps earlier than `tick` that were never asked about are skipped.
    pub fn take_due(&mut self, tick: Tick) -> bool {
        while self.cursor < self.ticks.len() && self.ticks[self.cursor] < tick {
            self.cursor += 1;
        }
        if self.cursor < self.ticks.len() && self.ticks[self.cursor] == tick {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// The next admission step, or `None` once exhausted.
    pub fn next_tick(&self) -> Option<Tick> {
        self.ticks.get(self.cursor).copied()
    }

    /// All admission steps, including those already taken.
    pub fn ticks(&self) -> &[Tick] {
        &self.ticks
    }

    /// Total number of admissions over the run.
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// Admissions not yet taken.
    pub fn remaining(&self) -> usize {
        self.ticks.len() - self.cursor
    }
}

impl InflowQueue {
    /// Admissions falling into each of `intervals` consecutive windows of
    /// `interval_ticks` steps.  Steps beyond the last window are ignored.
    pub fn counts_per_interval(&self, interval_ticks: u64, intervals: usize) -> Vec<u64> {
        let mut counts = vec![0u64; intervals];
        if interval_ticks == 0 {
            return counts;
        }
        for t in &self.ticks {
            let i = (t.0 / interval_ticks) as usize;
            if let Some(c) = counts.get_mut(i) {
                *c += 1;
            }
        }
        counts
    }
}
