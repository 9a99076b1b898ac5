//! bikelane: run one bicycle-traffic scenario.
//!
//! ```text
//! bikelane [SCENARIO.json] [OUTPUT_NAME]
//! ```
//!
//! Without a scenario file the base scenario (BS-S) runs.  An output name,
//! given on the command line or in the scenario, writes the trajectory
//! dataset to `<output_dir>/<name>.csv` and the step summaries to
//! `<output_dir>/<name>_ticks.csv`.
//!
//! Logging goes through `env_logger` (`RUST_LOG`, default `info`).  Set
//! `"trace": <id>` in the scenario and `RUST_LOG=bl_behavior=debug` to
//! follow one cyclist's decisions.

mod scenario;

use std::env;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;

use bl_behavior::CyclistBehavior;
use bl_output::{CsvWriter, TrajectoryRecorder};
use bl_sim::{NoopObserver, Sim, SimBuilder};

use scenario::Scenario;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = env::args().skip(1);
    let mut scenario = match args.next() {
        Some(path) => Scenario::from_json_file(&PathBuf::from(path))?,
        None => Scenario::default(),
    };
    if let Some(name) = args.next() {
        scenario.output = Some(name);
    }

    info!(
        "scenario {}: seed {}, {} s in {} s steps, {:?} inflow of {} cyclists, {} m path, bottleneck {:?}",
        scenario.name,
        scenario.sim.seed,
        scenario.sim.duration_secs,
        scenario.sim.step_secs,
        scenario.inflow.policy,
        scenario.inflow.demand.total(),
        scenario.path.width,
        scenario.path.bottleneck_width,
    );

    let behavior = match scenario.traced_agent() {
        Some(tag) => {
            info!("tracing cyclist {tag}");
            CyclistBehavior::tracing(tag)
        }
        None => CyclistBehavior::new(),
    };
    let mut sim = build_sim(&scenario, behavior)?;

    let started = Instant::now();
    match &scenario.output {
        Some(name) => {
            let writer = CsvWriter::new(&scenario.output_dir, name).with_context(|| {
                format!("creating output {name} in {}", scenario.output_dir.display())
            })?;
            let path = writer.path().to_path_buf();
            let mut recorder = TrajectoryRecorder::new(writer, scenario.sim.step_secs);
            sim.run(&mut recorder)?;
            if let Some(e) = recorder.take_error() {
                return Err(e).context("writing the trajectory dataset");
            }
            info!("wrote {} rows to {}", recorder.writer().rows(), path.display());
        }
        None => sim.run(&mut NoopObserver)?,
    }

    info!(
        "{}: {} cyclists admitted, {} still on the path, run took {:.2?}",
        scenario.name,
        sim.admitted,
        sim.agents.mobile_count(),
        started.elapsed(),
    );
    info!("{}", sim.counters);
    Ok(())
}

fn build_sim(scenario: &Scenario, behavior: CyclistBehavior) -> Result<Sim<CyclistBehavior>> {
    let sim = SimBuilder::new(scenario.sim.clone(), behavior)
        .path(scenario.path.clone())
        .calibration(scenario.calibration.clone())
        .inflow(scenario.inflow.clone())
        .build()
        .with_context(|| format!("setting up scenario {}", scenario.name))?;
    Ok(sim)
}
