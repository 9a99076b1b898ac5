//! Deterministic per-cyclist and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each cyclist draws its fixed attributes from its own `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (agent_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive agent IDs uniformly across the seed space.
//! A cyclist's attributes therefore depend only on the run seed and its
//! admission number, never on how many random draws the inflow generator
//! or other cyclists consumed before it.
//!
//! Run-wide draws (stochastic inflow, admission offsets) come from `SimRng`.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::AgentId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// Per-cyclist deterministic RNG, used once at creation to draw the
/// cyclist's calibration attributes.
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the run's global seed and an agent ID.
    pub fn new(global_seed: u64, agent: AgentId) -> Self {
        let seed = global_seed ^ (agent.0 as u64).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Gaussian draw rejected and redrawn until it lies within
    /// `mean ± k * sd`.
    ///
    /// A zero, negative or non-finite `sd` degenerates to `mean`.
    pub fn truncated_normal(&mut self, mean: f64, sd: f64, k: f64) -> f64 {
        let normal = match Normal::new(mean, sd) {
            Ok(n) if sd > 0.0 => n,
            _ => return mean,
        };
        let (lo, hi) = (mean - k * sd, mean + k * sd);
        loop {
            let v = normal.sample(&mut self.0);
            if (lo..=hi).contains(&v) {
                return v;
            }
        }
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for run-wide draws (inflow generation, admission
/// offsets).
///
/// Used only from the single-threaded parts of the tick loop.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset, used to give
    /// the inflow generator its own stream independent of admission draws.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }
}
