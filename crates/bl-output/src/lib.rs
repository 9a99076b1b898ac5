//! `bl-output`: the trajectory dataset and its writers.
//!
//! | Backend         | Destination                                        |
//! |-----------------|----------------------------------------------------|
//! | [`CsvWriter`]   | `<name>.csv` and `<name>_ticks.csv`, `;`-delimited |
//! | [`MemoryWriter`]| `Vec<TrajectoryRow>` / `Vec<TickSummaryRow>`       |
//!
//! Both implement [`OutputWriter`] and are driven by
//! [`TrajectoryRecorder`], which implements `bl_sim::SimObserver`.  The
//! dataset holds exactly one row per cyclist per step it was on the path,
//! ordered by step and then by agent.
//!
//! # Usage
//!
//! ```rust,ignore
//! use bl_output::{CsvWriter, TrajectoryRecorder};
//!
//! let writer = CsvWriter::new(Path::new("./output"), "bs_s")?;
//! let mut rec = TrajectoryRecorder::new(writer, config.step_secs);
//! sim.run(&mut rec)?;
//! if let Some(e) = rec.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod memory;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use self::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use memory::MemoryWriter;
pub use observer::TrajectoryRecorder;
pub use row::{TickSummaryRow, TrajectoryRow};
pub use writer::OutputWriter;
