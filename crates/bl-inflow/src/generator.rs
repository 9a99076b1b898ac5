//! Admission-step generation.

use log::{debug, info};

use bl_core::{SimRng, Tick};

use crate::{DemandProfile, InflowError, InflowPolicy, InflowQueue, InflowResult};

/// Turns a demand profile into the admission steps of one run.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InflowGenerator {
    pub policy: InflowPolicy,
    pub demand: DemandProfile,
}

impl InflowGenerator {
    pub fn new(policy: InflowPolicy, demand: DemandProfile) -> Self {
        Self { policy, demand }
    }

    /// Admission steps for a run of `total_ticks` steps.
    ///
    /// The fixed policy draws nothing from `rng`.  The stochastic policy
    /// draws exactly one uniform number per step of each interval, so the
    /// result depends only on the rng state, the profile and `total_ticks`.
    pub fn generate(&self, total_ticks: u64, rng: &mut SimRng) -> InflowResult<InflowQueue> {
        let ticks = match self.policy {
            InflowPolicy::Fixed      => self.fixed(total_ticks)?,
            InflowPolicy::Stochastic => self.stochastic(total_ticks, rng)?,
        };
        let queue = InflowQueue::from_ticks(ticks);
        info!(
            "inflow: {:?} policy, {} intervals, {} admissions (target {})",
            self.policy,
            self.demand.len(),
            queue.len(),
            self.demand.total(),
        );
        Ok(queue)
    }

    fn fixed(&self, total_ticks: u64) -> InflowResult<Vec<Tick>> {
        let per = self.demand.interval_ticks(total_ticks)?;
        if total_ticks % self.demand.len() as u64 != 0 {
            return Err(InflowError::UnevenIntervals {
                ticks:     total_ticks,
                intervals: self.demand.len(),
            });
        }
        if let Some(interval) = self.demand.counts().iter().position(|&d| d == 0) {
            return Err(InflowError::ZeroDemand { interval });
        }
        if let Some((interval, &demand)) = self
            .demand
            .counts()
            .iter()
            .enumerate()
            .find(|&(_, &d)| per % d as u64 != 0)
        {
            return Err(InflowError::UnevenDemand { interval, demand, interval_ticks: per });
        }

        let mut ticks = Vec::with_capacity(self.demand.total() as usize);
        for (i, &d) in self.demand.counts().iter().enumerate() {
            let start   = per * i as u64;
            let spacing = per / d as u64;
            ticks.extend((start..start + per).step_by(spacing as usize).map(Tick));
            debug!("inflow interval {i}: {d} admissions every {spacing} steps from {start}");
        }
        Ok(ticks)
    }

    fn stochastic(&self, total_ticks: u64, rng: &mut SimRng) -> InflowResult<Vec<Tick>> {
        let per = self.demand.interval_ticks(total_ticks)?;
        let exact_per = total_ticks as f64 / self.demand.len() as f64;

        let mut ticks = Vec::new();
        for (i, &d) in self.demand.counts().iter().enumerate() {
            let probability = d as f64 / exact_per;
            let start = per * i as u64;
            let before = ticks.len();
            for j in 0..per {
                if rng.random::<f64>() < probability {
                    ticks.push(Tick(start + j));
                }
            }
            debug!(
                "inflow interval {i}: p = {probability:.4}, {} admissions (target {d})",
                ticks.len() - before
            );
        }
        Ok(ticks)
    }
}
