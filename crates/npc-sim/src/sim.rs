//! The tick loop.

use npc_core::{AgentId, AgentRng, GameClock, SimConfig, Tick};
use npc_task::{TaskCtx, TaskScheduler};
use npc_world::{AgentStore, EventSink, HintCatalog, ItemRegistry, OverlaySurface, SensingPort};

use crate::SimObserver;

/// A ready-to-run simulation: world state plus one scheduler and one
/// deterministic RNG per agent.
///
/// Built via [`SimBuilder`][crate::SimBuilder].  Each tick:
///
/// 1. snapshot positions (`begin_tick`) so movement checks see a consistent
///    "previous position";
/// 2. for every live, enabled agent in ascending id order, assemble a
///    [`TaskCtx`] and run its scheduler;
/// 3. hand schedulers and RNGs to any agents added during the tick — they
///    participate from the next tick on;
/// 4. advance the clock.
///
/// The loop is single-threaded on purpose: tasks mutate the shared store
/// directly, and ascending-id order makes runs reproducible.
pub struct Sim<E: EventSink, V: OverlaySurface> {
    pub(crate) config: SimConfig,
    pub(crate) clock: GameClock,
    pub(crate) store: AgentStore,
    pub(crate) rngs: Vec<AgentRng>,
    pub(crate) schedulers: Vec<TaskScheduler>,
    pub(crate) items: ItemRegistry,
    pub(crate) sensing: Box<dyn SensingPort>,
    pub(crate) events: E,
    pub(crate) overlay: V,
    pub(crate) hints: HintCatalog,
}

impl<E: EventSink, V: OverlaySurface> Sim<E, V> {
    /// Run until the configured tick count is reached.
    pub fn run(&mut self, observer: &mut impl SimObserver) {
        let remaining = self.config.total_ticks.saturating_sub(self.clock.tick.0);
        self.run_ticks(remaining, observer);
        observer.on_sim_end(self.clock.tick);
    }

    /// Advance exactly `ticks` ticks.
    pub fn run_ticks(&mut self, ticks: u64, observer: &mut impl SimObserver) {
        for _ in 0..ticks {
            self.step(observer);
        }
    }

    fn step(&mut self, observer: &mut impl SimObserver) {
        observer.on_tick_start(self.clock.tick);
        self.events.begin_tick(self.clock.tick);
        self.store.begin_tick();

        // Agents added by spawner tasks during this tick get ids at the end
        // of the store; capping at the tick-start count defers them cleanly.
        let count = self.store.len();
        let mut updated = 0;
        for index in 0..count {
            let agent = AgentId(index as u32);
            if !self.store.is_alive(agent) || !self.store.is_enabled(agent) {
                continue;
            }
            let mut ctx = TaskCtx {
                agent,
                clock: &self.clock,
                rng: &mut self.rngs[index],
                store: &mut self.store,
                items: &mut self.items,
                sensing: &*self.sensing,
                events: &mut self.events,
                overlay: &mut self.overlay,
                hints: &self.hints,
            };
            self.schedulers[index].update(&mut ctx);
            updated += 1;
        }

        self.sync_population();
        observer.on_tick_end(self.clock.tick, updated, &self.store);
        self.clock.advance();
    }

    /// Give newly spawned agents an RNG and an (empty) scheduler.  Embedders
    /// arm them with [`Sim::attach_scheduler`], typically in response to a
    /// spawn event.
    fn sync_population(&mut self) {
        while self.rngs.len() < self.store.len() {
            let agent = AgentId(self.rngs.len() as u32);
            self.rngs.push(AgentRng::new(self.config.seed, agent));
            self.schedulers.push(TaskScheduler::new());
        }
    }

    /// Replace an agent's scheduler, binding every task in it.
    pub fn attach_scheduler(&mut self, agent: AgentId, mut scheduler: TaskScheduler) {
        scheduler.bind(agent);
        self.schedulers[agent.index()] = scheduler;
    }

    /// Raise the external activation signal for an agent (player interacted
    /// with it).
    pub fn signal(&mut self, agent: AgentId) {
        self.store.signal(agent);
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn tick(&self) -> Tick {
        self.clock.tick
    }

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    pub fn store(&self) -> &AgentStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut AgentStore {
        &mut self.store
    }

    pub fn items(&self) -> &ItemRegistry {
        &self.items
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn overlay(&self) -> &V {
        &self.overlay
    }

    /// Tear down, returning the event sink (to flush a recorder, say).
    pub fn into_events(self) -> E {
        self.events
    }
}
