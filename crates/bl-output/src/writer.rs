//! The `OutputWriter` trait implemented by all backend writers.

use crate::{OutputResult, TickSummaryRow, TrajectoryRow};

/// Trait implemented by the CSV and in-memory writers.
///
/// Errors do not stop the simulation; the recorder stores the first one, to
/// be retrieved with
/// [`TrajectoryRecorder::take_error`][crate::TrajectoryRecorder::take_error].
pub trait OutputWriter {
    /// Write the rows of one step, in agent order.
    fn write_trajectories(&mut self, rows: &[TrajectoryRow]) -> OutputResult<()>;

    /// Write one step summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Calling it more than once is a no-op.
    fn finish(&mut self) -> OutputResult<()>;
}
