//! CSV demand-profile loader.
//!
//! # CSV format
//!
//! One row per interval.  Rows may appear in any order but the interval
//! numbers must cover `0..n` exactly once.
//!
//! ```csv
//! interval,demand
//! 0,50
//! 1,100
//! 2,150
//! ```

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{DemandProfile, InflowError, InflowResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct DemandRecord {
    interval: usize,
    demand:   u32,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a demand profile from a CSV file.
pub fn load_demand_csv(path: &Path) -> InflowResult<DemandProfile> {
    let file = std::fs::File::open(path)?;
    load_demand_reader(file)
}

/// Like [`load_demand_csv`] but accepts any `Read` source.
pub fn load_demand_reader<R: Read>(reader: R) -> InflowResult<DemandProfile> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut rows: Vec<DemandRecord> = Vec::new();
    for result in csv_reader.deserialize::<DemandRecord>() {
        rows.push(result.map_err(|e| InflowError::Parse(e.to_string()))?);
    }
    if rows.is_empty() {
        return Err(InflowError::EmptyProfile);
    }
    rows.sort_unstable_by_key(|r| r.interval);

    for (expected, row) in rows.iter().enumerate() {
        if row.interval != expected {
            return Err(InflowError::Parse(format!(
                "interval {expected} is missing or repeated (found {} in its place)",
                row.interval
            )));
        }
    }

    Ok(DemandProfile::new(rows.into_iter().map(|r| r.demand).collect()))
}
