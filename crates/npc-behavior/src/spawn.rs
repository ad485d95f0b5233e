//! Entry animations and behaviors that add new agents to the world.
//!
//! Spawner tasks create agents directly through the store; new agents get
//! their schedulers from the simulation at the start of the next tick, so
//! offspring never act within the tick they appear.

use npc_core::{AgentId, Rect, Vec2};
use npc_task::{Priority, Task, TaskCtx, TaskResult, TaskState, TaskStatus, WaitTask};
use npc_world::Event;

/// Plays the spawn entry: announces itself, holds still for a fixed
/// duration, then completes for good.
///
/// Bids its priority until the pause has played once, then `NONE` forever,
/// so whatever else the agent does takes over naturally.
#[derive(Debug)]
pub struct SpawnTask {
    state: TaskState,
    priority: Priority,
    wait: WaitTask,
    completed: bool,
}

impl SpawnTask {
    pub fn new(priority: i32, duration_secs: f32) -> Self {
        SpawnTask {
            state: TaskState::new(),
            priority: Priority(priority),
            wait: WaitTask::new(duration_secs),
            completed: false,
        }
    }
}

impl Task for SpawnTask {
    fn bind(&mut self, owner: AgentId) {
        self.state.bind(owner);
        self.wait.bind(owner);
    }

    fn priority(&self, _ctx: &TaskCtx<'_>) -> TaskResult<Priority> {
        Ok(if self.completed { Priority::NONE } else { self.priority })
    }

    fn start(&mut self, ctx: &mut TaskCtx<'_>) {
        self.state.activate();
        ctx.trigger(Event::SpawnStart);
        self.wait.start(ctx);
    }

    fn update(&mut self, ctx: &mut TaskCtx<'_>) {
        self.wait.update(ctx);
        if self.wait.status() == TaskStatus::Inactive {
            self.completed = true;
            self.state.deactivate();
        }
    }

    fn stop(&mut self, ctx: &mut TaskCtx<'_>) {
        self.wait.stop(ctx);
        self.state.deactivate();
    }

    fn status(&self) -> TaskStatus {
        self.state.status()
    }
}

/// Periodically produces offspring at random points near the hive, keeping
/// the number of *live* offspring under a ceiling.
///
/// Dead offspring are pruned each tick, so the hive replaces losses over
/// time.
#[derive(Debug)]
pub struct HiveTask {
    state: TaskState,
    priority: Priority,
    interval_secs: f32,
    max_live: usize,
    /// Full width/height of the rectangle offspring appear in, centered on
    /// the hive.
    spawn_extent: Vec2,
    offspring: Vec<AgentId>,
    elapsed_secs: f32,
}

impl HiveTask {
    pub fn new(priority: i32, interval_secs: f32, max_live: usize, spawn_extent: Vec2) -> Self {
        HiveTask {
            state: TaskState::new(),
            priority: Priority(priority),
            interval_secs,
            max_live,
            spawn_extent,
            offspring: Vec::new(),
            elapsed_secs: 0.0,
        }
    }

    /// Live offspring currently attributed to this hive.
    pub fn live_count(&self, ctx: &TaskCtx<'_>) -> usize {
        self.offspring.iter().filter(|&&a| ctx.store.is_alive(a)).count()
    }
}

impl Task for HiveTask {
    fn bind(&mut self, owner: AgentId) {
        self.state.bind(owner);
    }

    fn priority(&self, _ctx: &TaskCtx<'_>) -> TaskResult<Priority> {
        Ok(self.priority)
    }

    fn start(&mut self, _ctx: &mut TaskCtx<'_>) {
        self.state.activate();
    }

    fn update(&mut self, ctx: &mut TaskCtx<'_>) {
        self.offspring.retain(|&a| ctx.store.is_alive(a));

        self.elapsed_secs += ctx.dt();
        if self.elapsed_secs < self.interval_secs {
            return;
        }
        self.elapsed_secs = 0.0;

        if self.offspring.len() >= self.max_live {
            return;
        }
        let position = ctx.rng.pos_in_rect(Rect::centered(ctx.center(), self.spawn_extent));
        let half_size = ctx.store.half_sizes[ctx.agent.index()];
        let child = ctx.store.add_agent(position, half_size);
        self.offspring.push(child);
        ctx.trigger(Event::OffspringSpawned { agent: child });
    }

    fn stop(&mut self, _ctx: &mut TaskCtx<'_>) {
        self.state.deactivate();
    }

    fn status(&self) -> TaskStatus {
        self.state.status()
    }
}

/// Proximity-gated minion spawner: while a target lingers nearby, produces a
/// minion immediately and then one per interval, up to a lifetime cap.
///
/// Uses the usual hysteresis pair: eligible inside the trigger distance,
/// disengages only past the (larger) release distance.
#[derive(Debug)]
pub struct MinionSpawnTask {
    state: TaskState,
    target: AgentId,
    priority: Priority,
    trigger_distance: f32,
    release_distance: f32,
    interval_secs: f32,
    max_spawns: u32,
    spawned: u32,
    elapsed_secs: f32,
}

impl MinionSpawnTask {
    pub fn new(
        target: AgentId,
        priority: i32,
        trigger_distance: f32,
        release_distance: f32,
        interval_secs: f32,
        max_spawns: u32,
    ) -> Self {
        debug_assert!(trigger_distance < release_distance, "trigger distance must sit inside the release distance");
        MinionSpawnTask {
            state: TaskState::new(),
            target,
            priority: Priority(priority),
            trigger_distance,
            release_distance,
            interval_secs,
            max_spawns,
            spawned: 0,
            elapsed_secs: 0.0,
        }
    }

    pub fn spawned_count(&self) -> u32 {
        self.spawned
    }
}

impl Task for MinionSpawnTask {
    fn bind(&mut self, owner: AgentId) {
        self.state.bind(owner);
    }

    fn priority(&self, ctx: &TaskCtx<'_>) -> TaskResult<Priority> {
        let distance = ctx.distance_to(self.target);
        let eligible = match self.state.status() {
            TaskStatus::Active => distance <= self.release_distance,
            TaskStatus::Inactive => distance < self.trigger_distance,
        };
        Ok(if eligible && self.spawned < self.max_spawns { self.priority } else { Priority::NONE })
    }

    fn start(&mut self, _ctx: &mut TaskCtx<'_>) {
        self.state.activate();
        self.elapsed_secs = 0.0;
    }

    fn update(&mut self, ctx: &mut TaskCtx<'_>) {
        if self.spawned >= self.max_spawns {
            return;
        }
        let due = self.spawned == 0 || self.elapsed_secs >= self.interval_secs;
        self.elapsed_secs += ctx.dt();
        if !due {
            return;
        }
        self.elapsed_secs = 0.0;
        let position = ctx.pos();
        let half_size = ctx.store.half_sizes[ctx.agent.index()];
        let minion = ctx.store.add_agent(position, half_size);
        self.spawned += 1;
        ctx.trigger(Event::MinionSpawned { agent: minion });
    }

    fn stop(&mut self, _ctx: &mut TaskCtx<'_>) {
        self.state.deactivate();
    }

    fn status(&self) -> TaskStatus {
        self.state.status()
    }
}
