//! In-memory backend: keeps the dataset as row vectors.

use crate::writer::OutputWriter;
use crate::{OutputResult, TickSummaryRow, TrajectoryRow};

/// Collects every row in memory.  Never fails.
#[derive(Debug, Default, Clone)]
pub struct MemoryWriter {
    pub trajectories: Vec<TrajectoryRow>,
    pub ticks:        Vec<TickSummaryRow>,
    pub finished:     bool,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows of one cyclist, in step order.
    pub fn trajectory_of(&self, agent_id: u32) -> impl Iterator<Item = &TrajectoryRow> + '_ {
        self.trajectories.iter().filter(move |r| r.agent_id == agent_id)
    }
}

impl OutputWriter for MemoryWriter {
    fn write_trajectories(&mut self, rows: &[TrajectoryRow]) -> OutputResult<()> {
        self.trajectories.extend_from_slice(rows);
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.ticks.push(*row);
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.finished = true;
        Ok(())
    }
}
