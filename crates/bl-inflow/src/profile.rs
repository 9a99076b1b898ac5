//! Demand profile and inflow policy selector.

use crate::{InflowError, InflowResult};

/// Target number of admissions for each equal-length interval of the run.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DemandProfile {
    counts: Vec<u32>,
}

impl DemandProfile {
    pub fn new(counts: Vec<u32>) -> Self {
        Self { counts }
    }

    /// Per-interval target counts in interval order.
    #[inline]
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// Number of intervals.
    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all interval targets.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }

    /// Steps per interval for a run of `total_ticks` steps.
    ///
    /// Requires at least one interval and at least one step per interval.
    /// Whether the split must be exact is up to the policy.
    pub fn interval_ticks(&self, total_ticks: u64) -> InflowResult<u64> {
        if self.counts.is_empty() {
            return Err(InflowError::EmptyProfile);
        }
        let per = total_ticks / self.counts.len() as u64;
        if per == 0 {
            return Err(InflowError::UnevenIntervals {
                ticks:     total_ticks,
                intervals: self.counts.len(),
            });
        }
        Ok(per)
    }
}

impl From<Vec<u32>> for DemandProfile {
    fn from(counts: Vec<u32>) -> Self {
        Self::new(counts)
    }
}

impl Default for DemandProfile {
    /// The base scenario's twelve-interval peak profile.
    fn default() -> Self {
        Self::new(vec![50, 100, 150, 200, 300, 350, 400, 300, 200, 150, 100, 50])
    }
}

/// How admission steps are placed within each demand interval.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum InflowPolicy {
    /// Evenly spaced admissions; the interval length must be a multiple of
    /// every demand value.
    Fixed,
    /// Independent Bernoulli draw per step.
    #[default]
    Stochastic,
}
