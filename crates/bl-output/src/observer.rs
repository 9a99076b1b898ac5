//! `TrajectoryRecorder<W>`: bridges `SimObserver` to an `OutputWriter`.

use log::info;

use bl_agent::AgentStore;
use bl_core::Tick;
use bl_sim::{SimCounters, SimObserver, TickStats};

use crate::row::{TickSummaryRow, TrajectoryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes one row per cyclist per step, plus one
/// summary row per step, to any [`OutputWriter`] backend.
///
/// Static obstacles are not part of the dataset.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct TrajectoryRecorder<W: OutputWriter> {
    writer:     W,
    step_secs:  f64,
    rows:       Vec<TrajectoryRow>,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> TrajectoryRecorder<W> {
    /// Create a recorder backed by `writer`; `step_secs` converts steps to
    /// simulated seconds in the summary rows.
    pub fn new(writer: W, step_secs: f64) -> Self {
        Self {
            writer,
            step_secs,
            rows:       Vec::new(),
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect rows after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for TrajectoryRecorder<W> {
    fn on_snapshot(&mut self, step: Tick, agents: &AgentStore) {
        self.rows.clear();
        self.rows
            .extend(agents.iter().filter_map(|a| TrajectoryRow::from_agent(step.0, a)));
        if !self.rows.is_empty() {
            let result = self.writer.write_trajectories(&self.rows);
            self.store_err(result);
        }
    }

    fn on_tick_end(&mut self, step: Tick, stats: &TickStats) {
        let row = TickSummaryRow {
            step:      step.0,
            time_secs: step.0 as f64 * self.step_secs,
            active:    stats.active as u64,
            admitted:  stats.admitted as u64,
            exited:    stats.exited as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, final_tick: Tick, counters: &SimCounters) {
        let result = self.writer.finish();
        self.store_err(result);
        info!("recorded {final_tick} steps; {counters}");
    }
}
