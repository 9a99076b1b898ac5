//! Simulation observer trait for progress reporting and data collection.

use bl_agent::AgentStore;
use bl_core::Tick;

use crate::SimCounters;

/// Bookkeeping for one completed step.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Cyclists on the path after the commit phase, including any that
    /// crossed the exit this step.
    pub active: usize,
    /// Cyclists admitted this step.
    pub admitted: usize,
    /// Cyclists that crossed the exit this step and were removed.
    pub exited: usize,
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// Steps are numbered from 1: `on_tick_start(Tick(0))` is followed by
/// `on_snapshot(Tick(1), ..)` and `on_tick_end(Tick(1), ..)`.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, step: Tick, stats: &TickStats) {
///         if step.0 % self.interval == 0 {
///             println!("{step}: {} cyclists on the path", stats.active);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after every commit, before exited cyclists are removed.
    ///
    /// Provides read-only access to the full agent state so that output
    /// writers can record one row per agent without the sim needing to know
    /// about any specific output format.  Static obstacles are included;
    /// filter on [`AgentTag::is_static`][bl_core::AgentTag::is_static].
    fn on_snapshot(&mut self, _step: Tick, _agents: &AgentStore) {}

    /// Called at the end of each step, after exited cyclists are removed.
    fn on_tick_end(&mut self, _step: Tick, _stats: &TickStats) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick, _counters: &SimCounters) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
