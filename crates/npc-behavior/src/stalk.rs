//! Wandering predator that senses a nearby target only while it holds still.

use npc_core::{AgentId, Rect, Vec2};
use npc_task::{MoveTask, Priority, Task, TaskCtx, TaskResult, TaskState, TaskStatus, WaitTask};
use npc_world::Event;

use crate::wander::{SPAWN_PAUSE_SECS, WanderIdleTask};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Spawning,
    Waiting,
    Moving,
}

/// Wanders around its anchor like [`WanderTask`][crate::WanderTask], but is
/// only eligible while the target is close, in line of sight and *not
/// moving* — it reacts to stillness, losing the scent the moment the target
/// moves.  Each wander leg is nudged toward the target, so repeated legs
/// close in on a target that keeps holding still.
#[derive(Debug)]
pub struct StalkTask {
    state: TaskState,
    target: AgentId,
    priority: Priority,
    view_distance: f32,
    range: Vec2,
    /// Per-axis nudge scale; the leg offset on each axis is
    /// `bias / (target - anchor)` on that axis, so the nudge grows as the
    /// target gets closer.
    bias: f32,
    anchor: Vec2,
    spawned: bool,
    phase: Phase,
    movement: MoveTask,
    wait: WaitTask,
    spawn_pause: WanderIdleTask,
}

impl StalkTask {
    pub fn new(
        target: AgentId,
        priority: i32,
        view_distance: f32,
        range: Vec2,
        wait_secs: f32,
        speed: f32,
    ) -> Self {
        StalkTask {
            state: TaskState::new(),
            target,
            priority: Priority(priority),
            view_distance,
            range,
            bias: 3.0,
            anchor: Vec2::ZERO,
            spawned: false,
            phase: Phase::Waiting,
            movement: MoveTask::new(Vec2::ZERO, speed),
            wait: WaitTask::new(wait_secs),
            spawn_pause: WanderIdleTask::new(SPAWN_PAUSE_SECS),
        }
    }

    pub fn with_bias(mut self, bias: f32) -> Self {
        self.bias = bias;
        self
    }

    fn biased_leg_target(&self, ctx: &mut TaskCtx<'_>) -> Vec2 {
        let sample = ctx.rng.pos_in_rect(Rect::centered(self.anchor, self.range));
        let toward = ctx.store.center(self.target) - self.anchor;
        let nudge = |axis: f32| if axis.abs() > f32::EPSILON { self.bias / axis } else { 0.0 };
        sample + Vec2::new(nudge(toward.x), nudge(toward.y))
    }

    fn begin_move_leg(&mut self, ctx: &mut TaskCtx<'_>) {
        let target = self.biased_leg_target(ctx);
        if target.x < self.anchor.x {
            ctx.trigger(Event::WanderLeft);
        } else {
            ctx.trigger(Event::WanderRight);
        }
        self.movement.set_target(target);
        self.movement.start(ctx);
        self.phase = Phase::Moving;
    }
}

impl Task for StalkTask {
    fn bind(&mut self, owner: AgentId) {
        self.state.bind(owner);
        self.movement.bind(owner);
        self.wait.bind(owner);
        self.spawn_pause.bind(owner);
    }

    fn priority(&self, ctx: &TaskCtx<'_>) -> TaskResult<Priority> {
        let eligible = ctx.distance_to(self.target) < self.view_distance
            && ctx.can_see(self.target)
            && !ctx.store.is_moving(self.target);
        Ok(if eligible { self.priority } else { Priority::NONE })
    }

    fn start(&mut self, ctx: &mut TaskCtx<'_>) {
        self.state.activate();
        if !self.spawned {
            self.spawned = true;
            self.anchor = ctx.pos();
            ctx.trigger(Event::SpawnStart);
            self.spawn_pause.start(ctx);
            self.phase = Phase::Spawning;
        } else {
            ctx.trigger(Event::StalkStart);
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
                    self.wait.start(ctx);
                    self.phase = Phase::Waiting;
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
