//! Unit tests for bl-output.

use std::fs;
use std::io;

use bl_agent::{AgentStore, Calibration, Kinematics};
use bl_behavior::CyclistBehavior;
use bl_core::{AgentId, AgentTag, PathConfig, Position, SimConfig, Tick};
use bl_inflow::{DemandProfile, InflowGenerator, InflowPolicy, InflowQueue};
use bl_sim::{SimBuilder, SimObserver};

use crate::{
    CsvWriter, MemoryWriter, OutputError, OutputResult, OutputWriter, TickSummaryRow,
    TrajectoryRecorder, TrajectoryRow,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn sample_row() -> TrajectoryRow {
    TrajectoryRow {
        step:          1,
        agent_id:      3,
        x:             12.5,
        y:             1.25,
        speed:         4.0,
        lateral_speed: -0.1,
        desired_speed: 5.2,
        sr_length:     4.3,
        sr_width:      0.74,
        cr_length:     20.0,
    }
}

fn sample_summary() -> TickSummaryRow {
    TickSummaryRow { step: 1, time_secs: 0.5, active: 1, admitted: 1, exited: 0 }
}

fn config(duration_secs: f64) -> SimConfig {
    SimConfig { seed: 11, step_secs: 0.5, duration_secs }
}

/// Fixed inflow of 11 cyclists over one minute, with a bottleneck.
fn small_builder() -> SimBuilder<CyclistBehavior> {
    let path = PathConfig { bottleneck_width: Some(1.5), ..PathConfig::default() };
    let inflow = InflowGenerator::new(InflowPolicy::Fixed, DemandProfile::new(vec![2, 4, 5]));
    SimBuilder::new(config(60.0), CyclistBehavior::new()).path(path).inflow(inflow)
}

// ── CSV backend ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use super::*;

    #[test]
    fn writes_semicolon_delimited_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut w = CsvWriter::new(dir.path(), "run").unwrap();
        w.write_trajectories(&[sample_row()]).unwrap();
        w.write_tick_summary(&sample_summary()).unwrap();
        w.finish().unwrap();
        assert_eq!(w.rows(), 1);
        assert!(w.path().ends_with("run.csv"));

        let text = fs::read_to_string(dir.path().join("run.csv")).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "step;agent_id;x;y;speed;lateral_speed;desired_speed;sr_length;sr_width;cr_length",
                "1;3;12.5;1.25;4;-0.1;5.2;4.3;0.74;20",
            ]
        );

        let text = fs::read_to_string(dir.path().join("run_ticks.csv")).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["step;time_secs;active;admitted;exited", "1;0.5;1;1;0"]);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(CsvWriter::new(&dir.path().join("missing"), "run").is_err());
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut w = CsvWriter::new(dir.path(), "run").unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

// ── Recorder ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod recorder_tests {
    use super::*;

    #[test]
    fn dataset_is_complete_and_ordered() {
        let mut sim = small_builder().build().unwrap();
        let mut rec = TrajectoryRecorder::new(MemoryWriter::new(), 0.5);
        sim.run(&mut rec).unwrap();
        assert!(rec.take_error().is_none());
        let out = rec.into_writer();

        assert!(out.finished);
        assert_eq!(out.ticks.len(), 120);
        assert_eq!(out.ticks.last().map(|t| t.time_secs), Some(60.0));

        // One row per cyclist on the path at every step.
        for t in &out.ticks {
            let n = out.trajectories.iter().filter(|r| r.step == t.step).count();
            assert_eq!(n as u64, t.active, "step {}", t.step);
        }
        // Sorted by step, then agent; obstacles are not part of it.
        for pair in out.trajectories.windows(2) {
            assert!((pair[0].step, pair[0].agent_id) < (pair[1].step, pair[1].agent_id));
        }
        assert!(out.trajectories.iter().all(|r| r.agent_id < 11));
        let admitted: u64 = out.ticks.iter().map(|t| t.admitted).sum();
        assert_eq!(admitted, 11);
    }

    #[test]
    fn cyclist_rows_stop_after_the_exit_step() {
        let params = Calibration::default().params(5.0, 1.0, true);
        let mut sim = SimBuilder::new(config(60.0), CyclistBehavior::new())
            .admissions(InflowQueue::new())
            .cyclist(params, Position::new(295.0, 1.0), 5.0)
            .build()
            .unwrap();
        let mut rec = TrajectoryRecorder::new(MemoryWriter::new(), 0.5);
        sim.run_ticks(4, &mut rec).unwrap();

        let out = rec.into_writer();
        let steps: Vec<u64> = out.trajectory_of(0).map(|r| r.step).collect();
        assert_eq!(steps, vec![1, 2]);
        assert_eq!(out.ticks[1].exited, 1);
        assert_eq!(out.trajectories[0].desired_speed, 5.0);
    }

    #[test]
    fn identical_runs_write_identical_files() {
        let run = |dir: &std::path::Path| {
            let mut sim = small_builder().build().unwrap();
            let mut rec = TrajectoryRecorder::new(CsvWriter::new(dir, "bs").unwrap(), 0.5);
            sim.run(&mut rec).unwrap();
            assert!(rec.take_error().is_none());
            (
                fs::read(dir.join("bs.csv")).unwrap(),
                fs::read(dir.join("bs_ticks.csv")).unwrap(),
            )
        };
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        let (traj_a, ticks_a) = run(a.path());
        let (traj_b, ticks_b) = run(b.path());
        assert!(traj_a.len() > 20_000);
        assert_eq!(traj_a, traj_b);
        assert_eq!(ticks_a, ticks_b);
    }

    /// Fails every trajectory write with a numbered error.
    #[derive(Default)]
    struct FailingWriter {
        calls: u32,
    }

    impl OutputWriter for FailingWriter {
        fn write_trajectories(&mut self, _rows: &[TrajectoryRow]) -> OutputResult<()> {
            self.calls += 1;
            Err(OutputError::Io(io::Error::other(format!("write {} failed", self.calls))))
        }

        fn write_tick_summary(&mut self, _row: &TickSummaryRow) -> OutputResult<()> {
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    #[test]
    fn first_write_error_is_kept() {
        let params = Calibration::default().params(5.0, 1.0, true);
        let mut store = AgentStore::new();
        let kin = Kinematics::moving(&params, Position::new(10.0, 1.0), 5.0);
        store.push(AgentTag::Cyclist(AgentId(0)), params, kin).unwrap();

        let mut rec = TrajectoryRecorder::new(FailingWriter::default(), 0.5);
        rec.on_snapshot(Tick(1), &store);
        rec.on_snapshot(Tick(2), &store);
        assert_eq!(rec.writer().calls, 2);

        let err = rec.take_error().unwrap();
        assert_eq!(err.to_string(), "I/O error: write 1 failed");
        assert!(rec.take_error().is_none());
    }

    #[test]
    fn obstacles_produce_no_rows() {
        let params = Calibration::default().obstacle_params();
        let mut store = AgentStore::new();
        let kin = Kinematics::stationary(&params, Position::new(251.0, 2.7));
        store
            .push(AgentTag::Obstacle(bl_core::ObstacleId(0)), params, kin)
            .unwrap();

        let mut rec = TrajectoryRecorder::new(MemoryWriter::new(), 0.5);
        rec.on_snapshot(Tick(1), &store);
        assert!(rec.writer().trajectories.is_empty());
    }
}
