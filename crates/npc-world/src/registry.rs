//! Registry of collectible items currently present in the world.
//!
//! Each entry maps an [`ItemId`] to the agent slot that carries the item's
//! position.  A `BTreeMap` keeps iteration in ascending id order, so nearest
//! scans resolve distance ties toward the earliest-registered item and runs
//! stay reproducible.

use std::collections::BTreeMap;

use npc_core::{AgentId, ItemId, Vec2};

use crate::store::AgentStore;

/// Items available for pickup or theft, keyed by id.
#[derive(Debug, Default)]
pub struct ItemRegistry {
    inner: BTreeMap<ItemId, AgentId>,
    next_id: u32,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the item carried by `agent` under a fresh id.
    pub fn register(&mut self, agent: AgentId) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        self.inner.insert(id, agent);
        id
    }

    /// Remove an item, returning its carrier if it was present.  Removing an
    /// absent id is a no-op.
    pub fn remove(&mut self, item: ItemId) -> Option<AgentId> {
        self.inner.remove(&item)
    }

    pub fn get(&self, item: ItemId) -> Option<AgentId> {
        self.inner.get(&item).copied()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, AgentId)> + '_ {
        self.inner.iter().map(|(&item, &agent)| (item, agent))
    }

    /// The registered item whose carrier is closest to `from`, skipping dead
    /// carriers.  Ties go to the lowest item id.
    pub fn nearest(&self, from: Vec2, store: &AgentStore) -> Option<(ItemId, AgentId, Vec2)> {
        let mut best: Option<(ItemId, AgentId, Vec2)> = None;
        let mut best_dist = f32::INFINITY;
        for (item, agent) in self.iter() {
            if !store.is_alive(agent) {
                continue;
            }
            let pos = store.center(agent);
            let dist = from.distance(pos);
            if dist < best_dist {
                best_dist = dist;
                best = Some((item, agent, pos));
            }
        }
        best
    }
}
