//! Mutable per-cyclist kinematic state.

use bl_core::Position;

use crate::CyclistParams;

/// Speed-dependent clearance envelope, recomputed after every commit.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Geometry {
    pub sr_length: f64,
    pub sr_width:  f64,
    pub cr_length: f64,
}

impl Geometry {
    #[inline]
    pub fn at_speed(params: &CyclistParams, speed: f64) -> Self {
        Self {
            sr_length: params.sr_length(speed),
            sr_width:  params.sr_width(speed),
            cr_length: params.cr_length(speed),
        }
    }
}

/// Position, speeds and derived geometry of one agent.
///
/// Written only by [`Kinematics::advance`] during the commit phase.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Kinematics {
    pub pos: Position,
    /// Longitudinal speed (m/s).
    pub speed: f64,
    /// Longitudinal acceleration applied in the last committed step (m/s²).
    pub acceleration: f64,
    /// Lateral speed applied in the last committed step (m/s, left positive).
    /// The next decision's lateral acceleration is bounded relative to it.
    pub lateral_speed: f64,
    /// Lateral speed of the step before that.
    pub prev_lateral_speed: f64,
    pub geometry: Geometry,
}

impl Kinematics {
    /// A cyclist entering at `pos` with the nearest agent in front
    /// `headway` metres ahead (centre to centre).
    ///
    /// The entry speed is the desired speed, lowered if needed so that the
    /// cyclist can still stop one body length behind that agent.
    pub fn entering(params: &CyclistParams, pos: Position, headway: f64) -> Self {
        let speed = params.v0.min(params.stopping_speed(headway - params.length));
        Self::moving(params, pos, speed)
    }

    /// A cyclist at `pos` moving straight ahead at `speed`.
    pub fn moving(params: &CyclistParams, pos: Position, speed: f64) -> Self {
        Self {
            pos,
            speed,
            acceleration: 0.0,
            lateral_speed: 0.0,
            prev_lateral_speed: 0.0,
            geometry: Geometry::at_speed(params, speed),
        }
    }

    /// A fixed obstacle at `pos`.
    pub fn stationary(params: &CyclistParams, pos: Position) -> Self {
        Self::moving(params, pos, 0.0)
    }

    /// Apply one step of constant-acceleration motion.
    ///
    /// `acceleration` is raised if needed so that speed never drops below
    /// zero within the step; the value actually applied is returned.  The
    /// lateral coordinate is kept within `[0, lateral_width]`.
    pub fn advance(
        &mut self,
        params:        &CyclistParams,
        acceleration:  f64,
        lateral_speed: f64,
        dt:            f64,
        lateral_width: f64,
    ) -> f64 {
        let acceleration = acceleration.max(-self.speed / dt);

        let x = self.pos.x + self.speed * dt + 0.5 * acceleration * dt * dt;
        let y = (self.pos.y + lateral_speed * dt).clamp(0.0, lateral_width);
        let speed = (self.speed + acceleration * dt).max(0.0);

        self.pos = Position::new(x, y);
        self.speed = speed;
        self.acceleration = acceleration;
        self.prev_lateral_speed = self.lateral_speed;
        self.lateral_speed = lateral_speed;
        self.geometry = Geometry::at_speed(params, speed);
        acceleration
    }
}
