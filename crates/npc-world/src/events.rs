//! Observable behavior events and the sink port they flow through.
//!
//! Behaviors announce every externally visible transition (animation cues,
//! sounds, UI updates) as an [`Event`] on the [`EventSink`].  The engine never
//! interprets these itself; they exist for the embedding game and for tests.

use npc_core::{AgentId, Compass8, ItemId, Tick};

/// A single behavior transition, tagged with the agent that raised it at the
/// sink.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// An agent entered the world via a spawn behavior.
    SpawnStart,
    /// No task is runnable this tick.
    Idle,

    // ── Locomotion ────────────────────────────────────────────────────────────
    WanderStart,
    WanderLeft,
    WanderRight,
    /// Fixed-heading run leg (compass wander).
    Run(Compass8),

    // ── Pursuit and evasion ───────────────────────────────────────────────────
    ChaseStart,
    ChaseLeft,
    ChaseRight,
    FleeStart,
    AvoidStart,
    StalkStart,
    PullLeft,
    PullRight,

    // ── Pause / dialogue ──────────────────────────────────────────────────────
    PauseStart,
    Paused,
    PauseEnd,
    PromptShown,
    PromptHidden,

    // ── Items and effects ─────────────────────────────────────────────────────
    ItemPickedUp { item: ItemId },
    ItemStolen { item: ItemId },
    EffectApplied,
    EffectExpired,

    // ── Spawning and combat ───────────────────────────────────────────────────
    OffspringSpawned { agent: AgentId },
    MinionSpawned { agent: AgentId },
    ShotFired,
    ProjectileMove { heading: Compass8 },
    ProjectileDone,
}

/// Outbound port for behavior events.
pub trait EventSink {
    fn trigger(&mut self, agent: AgentId, event: Event);

    /// Called once at the start of every simulation tick, before any agent
    /// updates.  Sinks that timestamp their output override this; the default
    /// does nothing.
    fn begin_tick(&mut self, _tick: Tick) {}
}

/// Sink that drops everything.  Default for runs that only care about final
/// world state.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn trigger(&mut self, _agent: AgentId, _event: Event) {}
}

/// Sink that appends every event, in trigger order, for later assertions.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub log: Vec<(AgentId, Event)>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events raised by one agent, in order.
    pub fn events_for(&self, agent: AgentId) -> Vec<Event> {
        self.log
            .iter()
            .filter(|(a, _)| *a == agent)
            .map(|(_, e)| *e)
            .collect()
    }

    /// How many times `event` was raised, across all agents.
    pub fn count(&self, event: Event) -> usize {
        self.log.iter().filter(|(_, e)| *e == event).count()
    }
}

impl EventSink for RecordingSink {
    fn trigger(&mut self, agent: AgentId, event: Event) {
        self.log.push((agent, event));
    }
}
