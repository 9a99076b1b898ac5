//! Scenario files: everything one run needs, as JSON.
//!
//! Every field is optional; missing fields take the base-scenario value.
//!
//! ```json
//! {
//!   "name": "BN-1.5",
//!   "sim": { "seed": 9 },
//!   "path": { "bottleneck_width": 1.5 },
//!   "inflow": { "policy": "fixed", "demand": [60, 120, 60] },
//!   "output": "bn_1_5"
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use bl_agent::Calibration;
use bl_core::{AgentId, AgentTag, PathConfig, SimConfig};
use bl_inflow::{InflowGenerator, load_demand_csv};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub name:        String,
    pub sim:         SimConfig,
    pub path:        PathConfig,
    pub calibration: Calibration,
    pub inflow:      InflowGenerator,

    /// `interval,demand` CSV replacing `inflow.demand`.  Relative paths are
    /// resolved against the scenario file's directory.
    pub demand_csv: Option<PathBuf>,

    /// Trajectory dataset name; no dataset is written when absent.
    pub output: Option<String>,

    pub output_dir: PathBuf,

    /// Admission number of a cyclist whose decisions are logged in detail.
    pub trace: Option<u32>,
}

impl Default for Scenario {
    /// The base scenario: a 2 m path without bottleneck, one hour in half
    /// second steps, stochastic inflow with the default hourly profile.
    fn default() -> Self {
        Self {
            name:        "BS-S".to_string(),
            sim:         SimConfig::default(),
            path:        PathConfig::default(),
            calibration: Calibration::default(),
            inflow:      InflowGenerator::default(),
            demand_csv:  None,
            output:      None,
            output_dir:  PathBuf::from("."),
            trace:       None,
        }
    }
}

impl Scenario {
    /// Read a scenario from a JSON file and load its demand CSV, if any.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        let mut scenario: Scenario = serde_json::from_str(&text)
            .with_context(|| format!("parsing scenario {}", path.display()))?;

        if let Some(csv) = &scenario.demand_csv {
            let csv = match path.parent() {
                Some(dir) => dir.join(csv),
                None => csv.clone(),
            };
            scenario.inflow.demand = load_demand_csv(&csv)
                .with_context(|| format!("loading demand profile {}", csv.display()))?;
        }
        Ok(scenario)
    }

    pub fn traced_agent(&self) -> Option<AgentTag> {
        self.trace.map(|id| AgentTag::Cyclist(AgentId(id)))
    }
}
