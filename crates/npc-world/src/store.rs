//! Structure-of-arrays storage for per-agent world state.
//!
//! Every `Vec` is indexed by [`AgentId::index`]; all vectors grow in lockstep
//! in [`AgentStore::add_agent`] and are never shrunk.  Disposing an agent
//! clears its `alive` flag but keeps the slot so ids stay stable for the
//! lifetime of the run (spawner behaviors add agents mid-run and recorded
//! events keep referring to earlier ids).

use npc_core::{AgentId, ItemId, Vec2};

/// World-side state for all agents, one slot per [`AgentId`].
#[derive(Debug, Default)]
pub struct AgentStore {
    /// Bottom-left corner of each agent's bounding box.
    pub positions: Vec<Vec2>,
    /// Half the width/height of the bounding box; `position + half_size` is
    /// the agent's center.
    pub half_sizes: Vec<Vec2>,
    /// Position at the start of the current tick, refreshed by
    /// [`AgentStore::begin_tick`].  Backs "has the agent moved" checks.
    pub prev_positions: Vec<Vec2>,
    /// `false` once the agent is disposed; dead agents are skipped by
    /// proximity scans and never updated again.
    pub alive: Vec<bool>,
    /// Behavior gate: a live but disabled agent keeps its state yet reports
    /// no task as runnable.
    pub enabled: Vec<bool>,
    /// One-shot activation flags raised from outside the engine (player
    /// interaction); consumed by [`AgentStore::take_signal`].
    pub signals: Vec<bool>,
    /// Items currently held by each agent.
    pub inventories: Vec<Vec<ItemId>>,
}

impl AgentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of slots ever allocated, including disposed agents.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Allocate a new live, enabled agent and return its id.
    pub fn add_agent(&mut self, position: Vec2, half_size: Vec2) -> AgentId {
        let id = AgentId(self.positions.len() as u32);
        self.positions.push(position);
        self.half_sizes.push(half_size);
        self.prev_positions.push(position);
        self.alive.push(true);
        self.enabled.push(true);
        self.signals.push(false);
        self.inventories.push(Vec::new());
        id
    }

    /// All ids ever allocated, ascending.  Callers filter on
    /// [`AgentStore::is_alive`] where liveness matters.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.positions.len() as u32).map(AgentId)
    }

    // ── Per-agent accessors ───────────────────────────────────────────────────

    #[inline]
    pub fn position(&self, agent: AgentId) -> Vec2 {
        self.positions[agent.index()]
    }

    #[inline]
    pub fn set_position(&mut self, agent: AgentId, position: Vec2) {
        self.positions[agent.index()] = position;
    }

    /// Center of the agent's bounding box.
    #[inline]
    pub fn center(&self, agent: AgentId) -> Vec2 {
        self.positions[agent.index()] + self.half_sizes[agent.index()]
    }

    #[inline]
    pub fn is_alive(&self, agent: AgentId) -> bool {
        self.alive[agent.index()]
    }

    #[inline]
    pub fn is_enabled(&self, agent: AgentId) -> bool {
        self.enabled[agent.index()]
    }

    pub fn set_enabled(&mut self, agent: AgentId, enabled: bool) {
        self.enabled[agent.index()] = enabled;
    }

    /// Mark an agent dead and disabled.  The slot is retained.
    pub fn dispose(&mut self, agent: AgentId) {
        self.alive[agent.index()] = false;
        self.enabled[agent.index()] = false;
    }

    // ── Tick bookkeeping ──────────────────────────────────────────────────────

    /// Snapshot all positions; call once at the top of each tick, before any
    /// behavior updates run.
    pub fn begin_tick(&mut self) {
        self.prev_positions.copy_from_slice(&self.positions);
    }

    /// Whether the agent has moved since the last [`AgentStore::begin_tick`].
    pub fn is_moving(&self, agent: AgentId) -> bool {
        self.positions[agent.index()] != self.prev_positions[agent.index()]
    }

    // ── Signals and inventory ─────────────────────────────────────────────────

    /// Raise the one-shot activation flag for an agent.
    pub fn signal(&mut self, agent: AgentId) {
        self.signals[agent.index()] = true;
    }

    /// Consume the activation flag, returning whether it was raised.
    pub fn take_signal(&mut self, agent: AgentId) -> bool {
        std::mem::take(&mut self.signals[agent.index()])
    }

    /// Peek at the activation flag without consuming it.
    pub fn has_signal(&self, agent: AgentId) -> bool {
        self.signals[agent.index()]
    }

    pub fn give_item(&mut self, agent: AgentId, item: ItemId) {
        self.inventories[agent.index()].push(item);
    }

    pub fn inventory(&self, agent: AgentId) -> &[ItemId] {
        &self.inventories[agent.index()]
    }
}
