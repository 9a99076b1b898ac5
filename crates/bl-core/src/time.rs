//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter.  The mapping to
//! simulated seconds is held in `SimClock`:
//!
//!   elapsed_secs = tick * step_secs
//!
//! Using an integer tick as the canonical time unit keeps inflow schedules
//! exact (admission steps are integers) and comparisons O(1).  The default
//! step length is 0.5 s.

use std::fmt;

use crate::{BlError, BlResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation step counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between tick counts and simulated seconds.
#[derive(Clone, Debug)]
pub struct SimClock {
    /// Simulated seconds per tick.
    pub step_secs: f64,
    /// The current tick, advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(step_secs: f64) -> Self {
        Self {
            step_secs,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.current_tick.0 as f64 * self.step_secs
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1} s)", self.current_tick, self.elapsed_secs())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Simulated seconds per step.
    pub step_secs: f64,

    /// Total simulated seconds.  Must be a whole number of steps.
    pub duration_secs: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed:          4,
            step_secs:     0.5,
            duration_secs: 3_600.0,
        }
    }
}

/// Tolerance when checking that the duration is a whole number of steps.
const STEP_RATIO_TOLERANCE: f64 = 1e-9;

impl SimConfig {
    /// Number of steps in the run.
    ///
    /// Fails if the step length is not positive or the duration is not an
    /// integral multiple of it.
    pub fn total_ticks(&self) -> BlResult<u64> {
        if !(self.step_secs.is_finite() && self.step_secs > 0.0) {
            return Err(BlError::Config(format!(
                "step length must be positive, got {}",
                self.step_secs
            )));
        }
        if !(self.duration_secs.is_finite() && self.duration_secs >= 0.0) {
            return Err(BlError::Config(format!(
                "duration must be non-negative, got {}",
                self.duration_secs
            )));
        }
        let ratio = self.duration_secs / self.step_secs;
        let rounded = ratio.round();
        if (ratio - rounded).abs() > STEP_RATIO_TOLERANCE * ratio.max(1.0) {
            return Err(BlError::Config(format!(
                "duration {} s is not a whole number of {} s steps",
                self.duration_secs, self.step_secs
            )));
        }
        Ok(rounded as u64)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.step_secs)
    }
}
