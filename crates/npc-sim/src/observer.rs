//! Simulation observer trait for progress reporting.

use npc_core::Tick;
use npc_world::AgentStore;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, updated: usize, _agents: &AgentStore) {
///         if tick.0 % self.interval == 0 {
///             println!("tick {tick}: updated {updated} agents");
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any agent updates.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick.
    ///
    /// `updated` is the number of live, enabled agents whose scheduler ran
    /// this tick.  `agents` is a read-only view of the store after all
    /// updates, suitable for recording position snapshots.
    fn on_tick_end(&mut self, _tick: Tick, _updated: usize, _agents: &AgentStore) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
