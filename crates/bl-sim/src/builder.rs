//! Fluent builder for constructing a [`Sim`].

use log::info;

use bl_agent::{AgentStore, Calibration, CyclistParams, Kinematics};
use bl_behavior::BehaviorModel;
use bl_core::{AgentId, AgentTag, ObstacleId, PathConfig, Position, SimConfig, SimRng, Tick};
use bl_inflow::{InflowGenerator, InflowQueue};
use bl_spatial::SpatialIndex;

use crate::{Sim, SimCounters, SimError, SimResult};

/// Offset passed to [`SimRng::child`] for the inflow generator's stream.
const INFLOW_STREAM: u64 = 1;

/// A cyclist placed on the path before the first step.
struct Placed {
    params: CyclistParams,
    pos:    Position,
    speed:  f64,
}

/// Fluent builder for [`Sim<B>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: seed, step length, duration
/// - `B: BehaviorModel`: the behavior implementation
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default                                        |
/// |---------------------|------------------------------------------------|
/// | `.path(p)`          | `PathConfig::default()` (2 m, no bottleneck)   |
/// | `.calibration(c)`   | `Calibration::default()`                       |
/// | `.inflow(g)`        | `InflowGenerator::default()` (stochastic)      |
/// | `.admissions(q)`    | Generated from the inflow generator            |
/// | `.cyclist(..)`      | Empty path                                     |
///
/// Every configuration check runs in [`build`](Self::build), so a bad
/// scenario fails before any step is taken.
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(SimConfig::default(), CyclistBehavior::new())
///     .path(PathConfig { bottleneck_width: Some(1.5), ..PathConfig::default() })
///     .inflow(InflowGenerator::new(InflowPolicy::Fixed, demand))
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<B: BehaviorModel> {
    config:      SimConfig,
    behavior:    B,
    path:        Option<PathConfig>,
    calibration: Option<Calibration>,
    inflow:      Option<InflowGenerator>,
    admissions:  Option<InflowQueue>,
    placed:      Vec<Placed>,
}

impl<B: BehaviorModel> SimBuilder<B> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, behavior: B) -> Self {
        Self {
            config,
            behavior,
            path:        None,
            calibration: None,
            inflow:      None,
            admissions:  None,
            placed:      Vec::new(),
        }
    }

    pub fn path(mut self, path: PathConfig) -> Self {
        self.path = Some(path);
        self
    }

    pub fn calibration(mut self, calibration: Calibration) -> Self {
        self.calibration = Some(calibration);
        self
    }

    /// Demand profile and policy used to generate the admission steps.
    pub fn inflow(mut self, inflow: InflowGenerator) -> Self {
        self.inflow = Some(inflow);
        self
    }

    /// Use explicit admission steps instead of generating them.
    pub fn admissions(mut self, queue: InflowQueue) -> Self {
        self.admissions = Some(queue);
        self
    }

    /// Place a cyclist on the path before the first step.
    ///
    /// Placed cyclists are numbered before any admitted ones, in call order.
    pub fn cyclist(mut self, params: CyclistParams, pos: Position, speed: f64) -> Self {
        self.placed.push(Placed { params, pos, speed });
        self
    }

    /// Validate inputs, generate admissions, place obstacles and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<B>> {
        // ── Validate configuration ────────────────────────────────────────
        let total_ticks = self.config.total_ticks()?;
        let path = self.path.unwrap_or_default();
        path.validate()?;
        let calibration = self.calibration.unwrap_or_default();
        calibration.validate()?;
        let bottleneck = path.bottleneck()?;

        // ── Admission steps ───────────────────────────────────────────────
        let mut rng = SimRng::new(self.config.seed);
        let mut inflow_rng = rng.child(INFLOW_STREAM);
        let inflow = match self.admissions {
            Some(queue) => queue,
            None => self
                .inflow
                .unwrap_or_default()
                .generate(total_ticks, &mut inflow_rng)?,
        };

        // ── Static obstacles ──────────────────────────────────────────────
        let mut agents = AgentStore::new();
        if let Some(bottleneck) = bottleneck {
            let params = calibration.obstacle_params();
            let positions = bottleneck.obstacle_positions(path.lateral_width());
            for (i, pos) in positions.iter().enumerate() {
                let id = ObstacleId::try_from(i)
                    .map_err(|_| SimError::Config(format!("too many bottleneck obstacles ({i})")))?;
                let kin = Kinematics::stationary(&params, *pos);
                agents.push(AgentTag::Obstacle(id), params.clone(), kin)?;
            }
            info!("bottleneck {:?}: {} static obstacles", bottleneck, positions.len());
        }

        // ── Pre-placed cyclists ───────────────────────────────────────────
        let mut admitted: u32 = 0;
        for Placed { params, pos, speed } in self.placed {
            check_placement(&path, pos, speed)?;
            let kin = Kinematics::moving(&params, pos, speed);
            agents.push(AgentTag::Cyclist(AgentId(admitted)), params, kin)?;
            admitted += 1;
        }

        let mut index = SpatialIndex::new(path.domain_length)?;
        index.rebuild(agents.kinematics.iter().map(|k| k.pos))?;

        Ok(Sim {
            clock:          self.config.make_clock(),
            end_tick:       Tick(total_ticks),
            config:         self.config,
            path,
            calibration,
            agents,
            index,
            inflow,
            rng,
            behavior:       self.behavior,
            counters:       SimCounters::default(),
            admitted,
            last_decisions: Vec::new(),
        })
    }
}

fn check_placement(path: &PathConfig, pos: Position, speed: f64) -> SimResult<()> {
    let on_path = pos.is_finite()
        && (0.0..path.length).contains(&pos.x)
        && (0.0..=path.lateral_width()).contains(&pos.y);
    if !on_path {
        return Err(SimError::Config(format!("cyclist placed off the path at {pos}")));
    }
    if !(speed.is_finite() && speed >= 0.0) {
        return Err(SimError::Config(format!("cyclist placed with invalid speed {speed}")));
    }
    Ok(())
}
