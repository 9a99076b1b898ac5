//! The `Sim` struct and its tick loop.

use log::{debug, info};

use bl_agent::{AgentStore, Calibration, Kinematics};
use bl_behavior::{BehaviorModel, Decision, SimContext};
use bl_core::{AgentId, AgentTag, PathConfig, Position, SimClock, SimConfig, SimRng, Tick};
use bl_inflow::InflowQueue;
use bl_spatial::SpatialIndex;

use crate::{SimCounters, SimObserver, SimResult, TickStats};

/// Distance (m) kept from each lateral edge when drawing a new cyclist's
/// entry offset.
const ENTRY_EDGE_OFFSET: f64 = 0.5;

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<B>` holds all simulation state and drives the tick loop:
///
/// 1. **Decide** (optionally parallel with the `parallel` feature): every
///    cyclist calls [`BehaviorModel::decide`] against the state committed at
///    the end of the previous tick.  Static obstacles coast.
/// 2. **Commit** (sequential, slot order): each cyclist applies its own
///    decision; counters are updated.
/// 3. **Admit**: if the inflow queue has an admission due, one new cyclist
///    enters at `x = 0`, no faster than lets it stop behind the nearest
///    agent already on the path.
/// 4. **Record**: the clock advances and observers see the new state.
/// 5. **Remove**: cyclists at or past the exit leave the store, and the
///    spatial index is rebuilt for the next decide phase.
///
/// Removal comes after recording, not before admission: a cyclist that
/// crosses the exit boundary appears in the snapshot of the step in which
/// it crossed, and is gone from the next decide phase onwards.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<B: BehaviorModel> {
    /// Seed, step length and duration.
    pub config: SimConfig,

    /// Path geometry.
    pub path: PathConfig,

    /// Calibration used to draw the attributes of admitted cyclists.
    pub calibration: Calibration,

    /// Simulation clock: current tick and its time in seconds.
    pub clock: SimClock,

    /// Exclusive upper bound of [`run`](Self::run).
    pub end_tick: Tick,

    /// Agent state (SoA arrays).  Behavior models access this through
    /// `SimContext`.
    pub agents: AgentStore,

    /// Neighbour index over the positions in `agents`, rebuilt after every
    /// tick.
    pub index: SpatialIndex,

    /// Remaining admission steps.
    pub inflow: InflowQueue,

    /// Stream for entry offsets.
    pub rng: SimRng,

    /// The behavior model.  Called once per cyclist per tick.
    pub behavior: B,

    /// Run-wide decision statistics.
    pub counters: SimCounters,

    /// Cyclists created so far (placed and admitted); the next one gets this
    /// number as its `AgentId`.
    pub admitted: u32,

    /// Decisions of the most recent tick, keyed by the agent that made them.
    pub last_decisions: Vec<(AgentTag, Decision)>,
}

impl<B: BehaviorModel> Sim<B> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `end_tick`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        info!(
            "running {} steps of {} s from {}: {} admissions pending, {} agents on the path",
            self.end_tick.0.saturating_sub(self.clock.current_tick.0),
            self.clock.step_secs,
            self.clock.current_tick,
            self.inflow.remaining(),
            self.agents.len(),
        );
        while self.clock.current_tick < self.end_tick {
            self.step(observer)?;
        }
        info!("finished at {}: {}", self.clock, self.counters);
        observer.on_sim_end(self.clock.current_tick, &self.counters);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        // ── Phase 1: decide ───────────────────────────────────────────────
        let decisions = self.decide_all(now)?;

        // ── Phase 2: commit ───────────────────────────────────────────────
        self.commit(&decisions);
        self.last_decisions = self.agents.tags.iter().copied().zip(decisions).collect();

        // ── Phase 3: admit ────────────────────────────────────────────────
        let admitted = if self.inflow.take_due(now) {
            self.admit(now)?;
            1
        } else {
            0
        };

        // ── Phase 4: record ───────────────────────────────────────────────
        self.clock.advance();
        let step = self.clock.current_tick;
        observer.on_snapshot(step, &self.agents);
        let active = self.agents.mobile_count();

        // ── Phase 5: remove ───────────────────────────────────────────────
        let exited = self.remove_exited(step);
        self.index.rebuild(self.agents.kinematics.iter().map(|k| k.pos))?;

        observer.on_tick_end(step, &TickStats { active, admitted, exited });
        Ok(())
    }

    /// Compute one decision per slot from the committed state.
    ///
    /// With the `parallel` Cargo feature the calls run on Rayon's thread
    /// pool.  The context is read-only, so the result is the same either way.
    fn decide_all(&self, now: Tick) -> SimResult<Vec<Decision>> {
        let ctx = SimContext::new(now, self.clock.step_secs, &self.path, &self.agents, &self.index);
        let behavior = &self.behavior;

        let decide = |slot: usize| -> SimResult<Decision> {
            let agent = ctx.agent(slot)?;
            if agent.tag.is_static() {
                return Ok(Decision::coast(agent.pos().y));
            }
            Ok(behavior.decide(slot, &ctx)?)
        };

        #[cfg(not(feature = "parallel"))]
        {
            (0..self.agents.len()).map(decide).collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            (0..self.agents.len()).into_par_iter().map(decide).collect()
        }
    }

    /// Apply every cyclist's decision to its own state, in slot order.
    fn commit(&mut self, decisions: &[Decision]) {
        let dt = self.clock.step_secs;
        let lateral_width = self.path.lateral_width();
        for (slot, d) in decisions.iter().enumerate() {
            if self.agents.tags[slot].is_static() {
                continue;
            }
            let params = &self.agents.params[slot];
            let kin = &mut self.agents.kinematics[slot];
            let y = kin.pos.y;
            kin.advance(params, d.acceleration, d.lateral_speed, dt, lateral_width);
            // Edge clamping can make the committed move shorter than asked.
            self.counters.record(d.overtaking, kin.pos.y - y);
        }
    }

    /// Admit the next cyclist at the entrance with a random lateral offset.
    ///
    /// Every agent at or past the entrance counts as being in front,
    /// whatever its lateral position, since any of them may become the
    /// newcomer's leader.
    fn admit(&mut self, now: Tick) -> SimResult<AgentTag> {
        let id = AgentId(self.admitted);
        let params = self.calibration.sample(self.config.seed, id);
        let span = self.path.lateral_width() - 2.0 * ENTRY_EDGE_OFFSET;
        let y = ENTRY_EDGE_OFFSET + self.rng.random::<f64>() * span;

        let headway = self
            .agents
            .iter()
            .map(|a| a.pos().x)
            .filter(|&x| x >= 0.0)
            .fold(f64::INFINITY, f64::min);
        let kin = Kinematics::entering(&params, Position::new(0.0, y), headway);
        debug!(
            "{now}: admitting cyclist {id} at y={y:.2}, {:.2} m/s (v0={:.2}, p={:.2}, look_back={}, headway {headway:.2})",
            kin.speed, params.v0, params.p, params.look_back,
        );
        let tag = AgentTag::Cyclist(id);
        self.agents.push(tag, params, kin)?;
        self.admitted += 1;
        Ok(tag)
    }

    /// Remove cyclists at or beyond the exit.  Returns how many left.
    fn remove_exited(&mut self, step: Tick) -> usize {
        let length = self.path.length;
        let exited: Vec<AgentTag> = self
            .agents
            .iter()
            .filter(|a| !a.tag.is_static() && a.pos().x >= length)
            .map(|a| a.tag)
            .collect();
        for tag in &exited {
            debug!("{step}: cyclist {tag} reached the exit");
        }
        self.agents.remove(&exited)
    }
}
