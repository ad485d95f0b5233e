//! Fluent builder for constructing a [`Sim`].

use npc_core::{AgentId, AgentRng, SimConfig};
use npc_task::TaskScheduler;
use npc_world::{
    AgentStore, EventSink, HintCatalog, ItemRegistry, NoopOverlay, NoopSink, OpenField,
    OverlaySurface, SensingPort,
};

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim<E, V>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — tick count, timestep, seed
/// - [`AgentStore`] — populated up front; its ids index the schedulers
/// - `.schedulers(v)` — one [`TaskScheduler`] per agent, in id order
///
/// # Optional inputs (have defaults)
///
/// | Method        | Default               |
/// |---------------|-----------------------|
/// | `.items(r)`   | empty registry        |
/// | `.sensing(s)` | [`OpenField`]         |
/// | `.events(e)`  | [`NoopSink`]          |
/// | `.overlay(v)` | [`NoopOverlay`]       |
/// | `.hints(h)`   | empty catalog         |
///
/// # Example
///
/// ```rust,ignore
/// let mut store = AgentStore::new();
/// let cow = store.add_agent(Vec2::new(5.0, 5.0), Vec2::new(0.5, 0.5));
/// let mut sim = SimBuilder::new(config, store)
///     .schedulers(vec![TaskScheduler::new().with_task(WanderTask::new(range, 2.0, 1.0))])
///     .events(RecordingSink::new())
///     .build()?;
/// sim.run(&mut NoopObserver);
/// ```
pub struct SimBuilder<E: EventSink, V: OverlaySurface> {
    config: SimConfig,
    store: AgentStore,
    schedulers: Option<Vec<TaskScheduler>>,
    items: ItemRegistry,
    sensing: Box<dyn SensingPort>,
    events: E,
    overlay: V,
    hints: HintCatalog,
}

impl SimBuilder<NoopSink, NoopOverlay> {
    /// Create a builder with the required inputs and all defaults.
    pub fn new(config: SimConfig, store: AgentStore) -> Self {
        SimBuilder {
            config,
            store,
            schedulers: None,
            items: ItemRegistry::new(),
            sensing: Box::new(OpenField),
            events: NoopSink,
            overlay: NoopOverlay::default(),
            hints: HintCatalog::default(),
        }
    }
}

impl<E: EventSink, V: OverlaySurface> SimBuilder<E, V> {
    /// Supply one scheduler per agent, in agent-id order.  Length must match
    /// the store's agent count.
    pub fn schedulers(mut self, schedulers: Vec<TaskScheduler>) -> Self {
        self.schedulers = Some(schedulers);
        self
    }

    /// Supply pre-registered items.
    pub fn items(mut self, items: ItemRegistry) -> Self {
        self.items = items;
        self
    }

    /// Supply the line-of-sight backend.
    pub fn sensing(mut self, sensing: impl SensingPort + 'static) -> Self {
        self.sensing = Box::new(sensing);
        self
    }

    /// Supply dialogue lines for pause and pickup prompts.
    pub fn hints(mut self, hints: HintCatalog) -> Self {
        self.hints = hints;
        self
    }

    /// Replace the event sink.
    pub fn events<E2: EventSink>(self, events: E2) -> SimBuilder<E2, V> {
        SimBuilder {
            config: self.config,
            store: self.store,
            schedulers: self.schedulers,
            items: self.items,
            sensing: self.sensing,
            events,
            overlay: self.overlay,
            hints: self.hints,
        }
    }

    /// Replace the overlay surface.
    pub fn overlay<V2: OverlaySurface>(self, overlay: V2) -> SimBuilder<E, V2> {
        SimBuilder {
            config: self.config,
            store: self.store,
            schedulers: self.schedulers,
            items: self.items,
            sensing: self.sensing,
            events: self.events,
            overlay,
            hints: self.hints,
        }
    }

    /// Validate inputs, bind every scheduler to its agent and seed the
    /// per-agent RNGs.
    pub fn build(self) -> SimResult<Sim<E, V>> {
        let agent_count = self.store.len();

        let mut schedulers = match self.schedulers {
            Some(s) => {
                if s.len() != agent_count {
                    return Err(SimError::AgentCountMismatch {
                        expected: agent_count,
                        got: s.len(),
                        what: "schedulers",
                    });
                }
                s
            }
            None => (0..agent_count).map(|_| TaskScheduler::new()).collect(),
        };

        if self.config.dt_secs <= 0.0 {
            return Err(SimError::Config(format!(
                "timestep must be positive, got {}",
                self.config.dt_secs
            )));
        }

        let mut rngs = Vec::with_capacity(agent_count);
        for (index, scheduler) in schedulers.iter_mut().enumerate() {
            let agent = AgentId(index as u32);
            scheduler.bind(agent);
            rngs.push(AgentRng::new(self.config.seed, agent));
        }

        Ok(Sim {
            clock: self.config.make_clock(),
            config: self.config,
            store: self.store,
            rngs,
            schedulers,
            items: self.items,
            sensing: self.sensing,
            events: self.events,
            overlay: self.overlay,
            hints: self.hints,
        })
    }
}
