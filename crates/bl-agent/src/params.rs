//! Fixed per-cyclist attributes.

/// Added to the speed-proportional term of the consideration range (m).
pub const CONSIDERATION_BASE: f64 = 4.0;

/// One cyclist's calibration attributes.  Set at creation, never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct CyclistParams {
    /// Desired longitudinal speed (m/s).
    pub v0: f64,
    /// Desired lateral position (m).
    pub p: f64,
    pub length: f64,
    pub width: f64,
    pub d_standing: f64,
    pub a_des: f64,
    pub b_max: f64,
    pub omega_max: f64,
    pub omega_des: f64,
    pub d_omega_max: f64,
    pub phi: f64,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    /// Whether this cyclist checks for faster riders behind before moving
    /// laterally.
    pub look_back: bool,
}

impl CyclistParams {
    /// Safety-region length ahead of the bicycle centre at `speed`.
    #[inline]
    pub fn sr_length(&self, speed: f64) -> f64 {
        self.length / 2.0 + self.d_standing + self.alpha * speed
    }

    /// Safety-region half-width at `speed`.
    #[inline]
    pub fn sr_width(&self, speed: f64) -> f64 {
        self.width / 2.0 + self.d_standing + self.beta * speed
    }

    /// Consideration-range length at `speed`.
    #[inline]
    pub fn cr_length(&self, speed: f64) -> f64 {
        CONSIDERATION_BASE + self.phi * speed
    }

    /// Speed-dependent cap on lateral speed: slow riders cannot swerve fast.
    #[inline]
    pub fn lateral_speed_cap(&self, speed: f64) -> f64 {
        self.omega_max.min(0.1 + 0.1 * speed)
    }

    /// Upper bound on passing: leaders at or below this speed are category 1.
    #[inline]
    pub fn passing_threshold(&self) -> f64 {
        self.gamma * self.v0
    }

    /// Highest speed from which braking at `b_max` stops within `gap`
    /// metres.  Zero when there is no room at all.
    #[inline]
    pub fn stopping_speed(&self, gap: f64) -> f64 {
        if gap > 0.0 { (2.0 * self.b_max * gap).sqrt() } else { 0.0 }
    }
}
