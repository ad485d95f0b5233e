//! Per-tick dependency bundle handed to every task callback.

use npc_core::{AgentId, AgentRng, GameClock, Vec2};
use npc_world::{AgentStore, Event, EventSink, HintCatalog, ItemRegistry, OverlaySurface, SensingPort};

/// Everything a task may touch during one tick, borrowed for the duration of
/// one scheduler update.
///
/// The simulation loop rebuilds this per agent per tick; tasks receive their
/// collaborators here instead of holding references themselves, which keeps
/// task structs plain data and lets tests assemble a world piecemeal.
pub struct TaskCtx<'a> {
    /// The agent whose scheduler is updating.
    pub agent: AgentId,

    /// Read-only clock; `dt_secs` is the fixed per-tick timestep.
    pub clock: &'a GameClock,

    /// The owning agent's deterministic RNG.
    pub rng: &'a mut AgentRng,

    /// Mutable world state.  Tasks move agents, spawn offspring and transfer
    /// items directly through the store.
    pub store: &'a mut AgentStore,

    /// Items currently available for pickup or theft.
    pub items: &'a mut ItemRegistry,

    /// Line-of-sight queries.
    pub sensing: &'a dyn SensingPort,

    /// Outbound behavior events.
    pub events: &'a mut dyn EventSink,

    /// Dialogue/hint overlay surface.
    pub overlay: &'a mut dyn OverlaySurface,

    /// Dialogue lines, keyed by agent with a fallback.
    pub hints: &'a HintCatalog,
}

impl TaskCtx<'_> {
    /// Seconds represented by this tick.
    #[inline]
    pub fn dt(&self) -> f32 {
        self.clock.dt_secs
    }

    /// Elapsed simulated seconds since the run started.
    #[inline]
    pub fn now_secs(&self) -> f64 {
        self.clock.now_secs()
    }

    /// The owning agent's position (bottom-left corner).
    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.store.position(self.agent)
    }

    /// The owning agent's center.
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.store.center(self.agent)
    }

    /// Center-to-center distance from the owning agent to `other`.
    #[inline]
    pub fn distance_to(&self, other: AgentId) -> f32 {
        self.center().distance(self.store.center(other))
    }

    /// Whether the owning agent has line of sight to `other`'s center.
    #[inline]
    pub fn can_see(&self, other: AgentId) -> bool {
        self.sensing.is_visible(self.center(), self.store.center(other))
    }

    /// Raise `event` on behalf of the owning agent.
    #[inline]
    pub fn trigger(&mut self, event: Event) {
        self.events.trigger(self.agent, event);
    }
}
