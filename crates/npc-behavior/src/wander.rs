//! Idle wandering around a home anchor.

use npc_core::{AgentId, Compass8, Rect, Vec2};
use npc_task::{MoveTask, Priority, Task, TaskCtx, TaskResult, TaskState, TaskStatus, WaitTask};
use npc_world::Event;

/// One-time pause played right after an agent enters the world, before its
/// first wander leg.
pub const SPAWN_PAUSE_SECS: f32 = 2.0;

/// Wandering never outbids a reactive behavior.
pub const WANDER_PRIORITY: Priority = Priority(1);

/// Timed stand-still that announces itself with an idle event.
///
/// Used by the wander family for the post-spawn pause; also usable on its own
/// wherever "stand around for a bit, visibly idle" is needed.
#[derive(Debug)]
pub struct WanderIdleTask {
    wait: WaitTask,
}

impl WanderIdleTask {
    pub fn new(duration_secs: f32) -> Self {
        WanderIdleTask { wait: WaitTask::new(duration_secs) }
    }
}

impl Task for WanderIdleTask {
    fn bind(&mut self, owner: AgentId) {
        self.wait.bind(owner);
    }

    fn priority(&self, ctx: &TaskCtx<'_>) -> TaskResult<Priority> {
        self.wait.priority(ctx)
    }

    fn start(&mut self, ctx: &mut TaskCtx<'_>) {
        ctx.trigger(Event::Idle);
        self.wait.start(ctx);
    }

    fn update(&mut self, ctx: &mut TaskCtx<'_>) {
        self.wait.update(ctx);
    }

    fn stop(&mut self, ctx: &mut TaskCtx<'_>) {
        self.wait.stop(ctx);
    }

    fn status(&self) -> TaskStatus {
        self.wait.status()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Spawning,
    Waiting,
    Moving,
}

/// Alternates between waiting in place and walking to a random point inside a
/// rectangle centered on the spot where the agent first started wandering.
///
/// The first activation plays a one-time spawn pause before the first leg.
/// Each move leg announces its horizontal direction relative to the anchor.
#[derive(Debug)]
pub struct WanderTask {
    state: TaskState,
    range: Vec2,
    anchor: Vec2,
    spawned: bool,
    phase: Phase,
    movement: MoveTask,
    wait: WaitTask,
    spawn_pause: WanderIdleTask,
    compass_events: bool,
}

impl WanderTask {
    /// `range` is the full width/height of the wander rectangle; `speed` is
    /// the walking speed of each leg.
    pub fn new(range: Vec2, wait_secs: f32, speed: f32) -> Self {
        WanderTask {
            state: TaskState::new(),
            range,
            anchor: Vec2::ZERO,
            spawned: false,
            phase: Phase::Waiting,
            movement: MoveTask::new(Vec2::ZERO, speed),
            wait: WaitTask::new(wait_secs),
            spawn_pause: WanderIdleTask::new(SPAWN_PAUSE_SECS),
            compass_events: false,
        }
    }

    /// Emit 8-way run-direction events at the start of each leg, for sprite
    /// sets animated per compass direction.
    pub fn with_compass_events(mut self) -> Self {
        self.compass_events = true;
        self
    }

    fn begin_move_leg(&mut self, ctx: &mut TaskCtx<'_>) {
        let target = ctx.rng.pos_in_rect(Rect::centered(self.anchor, self.range));
        if target.x < self.anchor.x {
            ctx.trigger(Event::WanderLeft);
        } else {
            ctx.trigger(Event::WanderRight);
        }
        if self.compass_events {
            ctx.trigger(Event::Run(Compass8::from_delta(target - ctx.pos())));
        }
        self.movement.set_target(target);
        self.movement.start(ctx);
        self.phase = Phase::Moving;
    }

    fn begin_wait(&mut self, ctx: &mut TaskCtx<'_>) {
        self.wait.start(ctx);
        self.phase = Phase::Waiting;
    }
}

impl Task for WanderTask {
    fn bind(&mut self, owner: AgentId) {
        self.state.bind(owner);
        self.movement.bind(owner);
        self.wait.bind(owner);
        self.spawn_pause.bind(owner);
    }

    fn priority(&self, _ctx: &TaskCtx<'_>) -> TaskResult<Priority> {
        Ok(WANDER_PRIORITY)
    }

    fn start(&mut self, ctx: &mut TaskCtx<'_>) {
        self.state.activate();
        ctx.trigger(Event::WanderStart);
        if !self.spawned {
            self.spawned = true;
            self.anchor = ctx.pos();
            ctx.trigger(Event::SpawnStart);
            self.spawn_pause.start(ctx);
            self.phase = Phase::Spawning;
        } else {
            self.begin_move_leg(ctx);
        }
    }

    fn update(&mut self, ctx: &mut TaskCtx<'_>) {
        match self.phase {
            Phase::Spawning => {
                self.spawn_pause.update(ctx);
                if self.spawn_pause.status() == TaskStatus::Inactive {
                    self.begin_move_leg(ctx);
                }
            }
            Phase::Waiting => {
                self.wait.update(ctx);
                if self.wait.status() == TaskStatus::Inactive {
                    self.begin_move_leg(ctx);
                }
            }
            Phase::Moving => {
                self.movement.update(ctx);
                if self.movement.status() == TaskStatus::Inactive {
                    self.begin_wait(ctx);
                }
            }
        }
    }

    fn stop(&mut self, ctx: &mut TaskCtx<'_>) {
        match self.phase {
            Phase::Spawning => self.spawn_pause.stop(ctx),
            Phase::Waiting => self.wait.stop(ctx),
            Phase::Moving => self.movement.stop(ctx),
        }
        self.state.deactivate();
    }

    fn status(&self) -> TaskStatus {
        self.state.status()
    }
}

/// [`WanderTask`] with compound 8-way run events, for agents whose sprites
/// are animated per compass direction.
#[derive(Debug)]
pub struct CompassWanderTask(WanderTask);

impl CompassWanderTask {
    pub fn new(range: Vec2, wait_secs: f32, speed: f32) -> Self {
        CompassWanderTask(WanderTask::new(range, wait_secs, speed).with_compass_events())
    }
}

impl Task for CompassWanderTask {
    fn bind(&mut self, owner: AgentId) {
        self.0.bind(owner);
    }

    fn priority(&self, ctx: &TaskCtx<'_>) -> TaskResult<Priority> {
        self.0.priority(ctx)
    }

    fn start(&mut self, ctx: &mut TaskCtx<'_>) {
        self.0.start(ctx);
    }

    fn update(&mut self, ctx: &mut TaskCtx<'_>) {
        self.0.update(ctx);
    }

    fn stop(&mut self, ctx: &mut TaskCtx<'_>) {
        self.0.stop(ctx);
    }

    fn status(&self) -> TaskStatus {
        self.0.status()
    }
}
