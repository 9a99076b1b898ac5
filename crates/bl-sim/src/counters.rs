//! Run-wide counters, updated only during the commit phase.

use std::fmt;

/// Aggregate statistics over every committed cyclist decision.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SimCounters {
    /// Cyclist decisions committed.  Static obstacles are not counted.
    pub decisions: u64,

    /// Decisions taken with at least one category-1 agent ahead.
    pub overtakes: u64,

    /// Total lateral distance (m) travelled during overtaking decisions.
    pub lateral_distance: f64,
}

impl SimCounters {
    /// Fraction of decisions that were overtaking decisions.
    pub fn overtake_share(&self) -> f64 {
        if self.decisions == 0 {
            0.0
        } else {
            self.overtakes as f64 / self.decisions as f64
        }
    }

    /// Mean lateral distance per overtaking decision.
    pub fn mean_lateral_distance(&self) -> f64 {
        if self.overtakes == 0 {
            0.0
        } else {
            self.lateral_distance / self.overtakes as f64
        }
    }

    pub(crate) fn record(&mut self, overtaking: bool, lateral_step: f64) {
        self.decisions += 1;
        if overtaking {
            self.overtakes += 1;
            self.lateral_distance += lateral_step.abs();
        }
    }
}

impl fmt::Display for SimCounters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} decisions, {} overtaking ({:.1}%), {:.3} m lateral per overtake",
            self.decisions,
            self.overtakes,
            100.0 * self.overtake_share(),
            self.mean_lateral_distance(),
        )
    }
}
