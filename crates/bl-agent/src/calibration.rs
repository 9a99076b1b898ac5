//! Run-wide calibration constants.
//!
//! Most values are shared by every cyclist.  Desired speed and desired
//! lateral position are drawn per cyclist from the ranges held here, and so
//! is the look-back flag.

use bl_core::{AgentId, AgentRng, BlError, BlResult};

use crate::CyclistParams;

/// Desired speeds are redrawn until they fall within this many standard
/// deviations of the mean.
pub const V0_TRUNCATION_SD: f64 = 2.0;

/// Model constants and attribute distributions.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Calibration {
    /// Mean desired longitudinal speed (m/s).
    pub v0_mean: f64,
    /// Standard deviation of desired longitudinal speed (m/s).
    pub v0_sd: f64,
    /// Mean desired lateral position (m from the right edge of the domain).
    pub p_mean: f64,
    /// Half-range of the uniform desired lateral position draw (m).
    pub p_sd: f64,
    /// Bicycle length (m).
    pub length: f64,
    /// Bicycle width (m).
    pub width: f64,
    /// Minimum standing distance to other cyclists (m).
    pub d_standing: f64,
    /// Relaxation time for acceleration (s).
    pub a_des: f64,
    /// Maximum braking (m/s², positive).
    pub b_max: f64,
    /// Maximum lateral speed (m/s).
    pub omega_max: f64,
    /// Desired lateral speed (m/s).
    pub omega_des: f64,
    /// Maximum lateral acceleration (m/s²).
    pub d_omega_max: f64,
    /// Consideration-range length coefficient.
    pub phi: f64,
    /// Safety-region length coefficient.
    pub alpha: f64,
    /// Safety-region width coefficient.
    pub beta: f64,
    /// Passing threshold: leaders at or below `gamma * v0` are overtaken.
    pub gamma: f64,
    /// Share of cyclists who look back before moving laterally, in [0, 1].
    pub lookback: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            v0_mean:     5.2,
            v0_sd:       1.0,
            p_mean:      1.0,
            p_sd:        0.2,
            length:      2.0,
            width:       0.8,
            d_standing:  0.1,
            a_des:       1.5,
            b_max:       3.0,
            omega_max:   0.3,
            omega_des:   0.15,
            d_omega_max: 0.2,
            phi:         4.0,
            alpha:       0.8,
            beta:        0.06,
            gamma:       0.85,
            lookback:    1.0,
        }
    }
}

impl Calibration {
    /// Draw the fixed attributes of cyclist `id`.
    ///
    /// Draw order is desired speed, desired lateral position, look-back flag;
    /// each cyclist uses its own RNG stream so the result depends only on
    /// `seed` and `id`.
    pub fn sample(&self, seed: u64, id: AgentId) -> CyclistParams {
        let mut rng = AgentRng::new(seed, id);
        let v0 = rng.truncated_normal(self.v0_mean, self.v0_sd, V0_TRUNCATION_SD);
        let p = if self.p_sd > 0.0 {
            rng.gen_range(self.p_mean - self.p_sd..=self.p_mean + self.p_sd)
        } else {
            self.p_mean
        };
        let look_back = rng.random::<f64>() < self.lookback;
        self.params(v0, p, look_back)
    }

    /// Attributes for a static bottleneck obstacle.  No random draws.
    pub fn obstacle_params(&self) -> CyclistParams {
        self.params(self.v0_mean, self.p_mean, false)
    }

    /// Attributes with explicit per-cyclist values.
    pub fn params(&self, v0: f64, p: f64, look_back: bool) -> CyclistParams {
        CyclistParams {
            v0,
            p,
            length:      self.length,
            width:       self.width,
            d_standing:  self.d_standing,
            a_des:       self.a_des,
            b_max:       self.b_max,
            omega_max:   self.omega_max,
            omega_des:   self.omega_des,
            d_omega_max: self.d_omega_max,
            phi:         self.phi,
            alpha:       self.alpha,
            beta:        self.beta,
            gamma:       self.gamma,
            look_back,
        }
    }

    /// Reject values the model cannot work with.
    pub fn validate(&self) -> BlResult<()> {
        let all = [
            self.v0_mean, self.v0_sd, self.p_mean, self.p_sd, self.length, self.width,
            self.d_standing, self.a_des, self.b_max, self.omega_max, self.omega_des,
            self.d_omega_max, self.phi, self.alpha, self.beta, self.gamma, self.lookback,
        ];
        if all.iter().any(|v| !v.is_finite()) {
            return Err(BlError::Config("calibration constants must be finite".into()));
        }
        if self.v0_mean - V0_TRUNCATION_SD * self.v0_sd <= 0.0 {
            return Err(BlError::Config(format!(
                "desired speed range {} ± {}·{} reaches zero",
                self.v0_mean, V0_TRUNCATION_SD, self.v0_sd
            )));
        }
        if self.v0_sd < 0.0 || self.p_sd < 0.0 {
            return Err(BlError::Config("standard deviations must be non-negative".into()));
        }
        if self.a_des <= 0.0 || self.b_max <= 0.0 {
            return Err(BlError::Config("a_des and b_max must be positive".into()));
        }
        if self.length <= 0.0 || self.width <= 0.0 || self.d_standing <= 0.0 {
            return Err(BlError::Config(
                "bicycle dimensions and standing distance must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.lookback) {
            return Err(BlError::Config(format!(
                "lookback share {} is outside [0, 1]",
                self.lookback
            )));
        }
        if !(0.0..1.0).contains(&self.gamma) {
            return Err(BlError::Config(format!(
                "passing threshold {} must lie in [0, 1)",
                self.gamma
            )));
        }
        Ok(())
    }
}
