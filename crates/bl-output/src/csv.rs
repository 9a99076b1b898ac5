//! CSV output backend.
//!
//! Creates two `;`-delimited files in the configured output directory:
//! - `<name>.csv`: the trajectory dataset
//! - `<name>_ticks.csv`: one summary row per step

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::{Writer, WriterBuilder};

use crate::writer::OutputWriter;
use crate::{OutputResult, TickSummaryRow, TrajectoryRow};

const DELIMITER: u8 = b';';

pub const TRAJECTORY_HEADER: [&str; 10] = [
    "step", "agent_id", "x", "y", "speed", "lateral_speed",
    "desired_speed", "sr_length", "sr_width", "cr_length",
];

pub const TICK_HEADER: [&str; 5] = ["step", "time_secs", "active", "admitted", "exited"];

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    trajectories: Writer<File>,
    summaries:    Writer<File>,
    path:         PathBuf,
    rows:         u64,
    finished:     bool,
}

impl CsvWriter {
    /// Create `<name>.csv` and `<name>_ticks.csv` in `dir` and write the
    /// header rows.  Existing files are overwritten.
    pub fn new(dir: &Path, name: &str) -> OutputResult<Self> {
        let path = dir.join(format!("{name}.csv"));
        let mut trajectories = open(&path)?;
        trajectories.write_record(TRAJECTORY_HEADER)?;

        let mut summaries = open(&dir.join(format!("{name}_ticks.csv")))?;
        summaries.write_record(TICK_HEADER)?;

        Ok(Self {
            trajectories,
            summaries,
            path,
            rows:     0,
            finished: false,
        })
    }

    /// Path of the trajectory file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Trajectory rows written so far.
    pub fn rows(&self) -> u64 {
        self.rows
    }
}

fn open(path: &Path) -> OutputResult<Writer<File>> {
    Ok(WriterBuilder::new().delimiter(DELIMITER).from_path(path)?)
}

impl OutputWriter for CsvWriter {
    fn write_trajectories(&mut self, rows: &[TrajectoryRow]) -> OutputResult<()> {
        for row in rows {
            self.trajectories.write_record(&[
                row.step.to_string(),
                row.agent_id.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.speed.to_string(),
                row.lateral_speed.to_string(),
                row.desired_speed.to_string(),
                row.sr_length.to_string(),
                row.sr_width.to_string(),
                row.cr_length.to_string(),
            ])?;
        }
        self.rows += rows.len() as u64;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.step.to_string(),
            row.time_secs.to_string(),
            row.active.to_string(),
            row.admitted.to_string(),
            row.exited.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.trajectories.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
