//! Direct pursuit and evasion of a single target agent.
//!
//! All three tasks share the hysteresis idiom: the distance that makes a task
//! eligible (view distance) is smaller than the distance at which a running
//! task gives up, so an agent hovering near the boundary does not flicker
//! between behaviors.

use npc_core::{AgentId, Vec2};
use npc_task::{MoveTask, Priority, Task, TaskCtx, TaskResult, TaskState, TaskStatus};
use npc_world::Event;

/// Emit a left/right facing event when the horizontal relation to `target_x`
/// changes.  Returns the new facing.
fn face(ctx: &mut TaskCtx<'_>, facing_left: Option<bool>, target_x: f32, left: Event, right: Event) -> Option<bool> {
    let now_left = target_x < ctx.pos().x;
    if facing_left != Some(now_left) {
        ctx.trigger(if now_left { left } else { right });
    }
    Some(now_left)
}

/// Chases a target agent while it is close enough and in line of sight.
///
/// Becomes eligible when the target is within the view distance and visible;
/// once running, it keeps chasing until the target escapes past the give-up
/// distance or breaks line of sight.  The movement delegate is retargeted to
/// the target's position every tick and restarted whenever it reports done,
/// so a target that doubles back never strands the chase.
#[derive(Debug)]
pub struct ChaseTask {
    state: TaskState,
    target: AgentId,
    priority: Priority,
    view_distance: f32,
    give_up_distance: f32,
    movement: MoveTask,
    facing_left: Option<bool>,
}

impl ChaseTask {
    pub fn new(target: AgentId, priority: i32, view_distance: f32, give_up_distance: f32, speed: f32) -> Self {
        debug_assert!(view_distance < give_up_distance, "view distance must sit inside the give-up distance");
        ChaseTask {
            state: TaskState::new(),
            target,
            priority: Priority(priority),
            view_distance,
            give_up_distance,
            movement: MoveTask::new(Vec2::ZERO, speed),
            facing_left: None,
        }
    }
}

impl Task for ChaseTask {
    fn bind(&mut self, owner: AgentId) {
        self.state.bind(owner);
        self.movement.bind(owner);
    }

    fn priority(&self, ctx: &TaskCtx<'_>) -> TaskResult<Priority> {
        let distance = ctx.distance_to(self.target);
        let eligible = match self.state.status() {
            TaskStatus::Active => distance <= self.give_up_distance && ctx.can_see(self.target),
            TaskStatus::Inactive => distance < self.view_distance && ctx.can_see(self.target),
        };
        Ok(if eligible { self.priority } else { Priority::NONE })
    }

    fn start(&mut self, ctx: &mut TaskCtx<'_>) {
        self.state.activate();
        self.facing_left = None;
        ctx.trigger(Event::ChaseStart);
        self.movement.set_target(ctx.store.position(self.target));
        self.movement.start(ctx);
    }

    fn update(&mut self, ctx: &mut TaskCtx<'_>) {
        let target_pos = ctx.store.position(self.target);
        self.facing_left = face(ctx, self.facing_left, target_pos.x, Event::ChaseLeft, Event::ChaseRight);

        self.movement.set_target(target_pos);
        self.movement.update(ctx);
        if self.movement.status() != TaskStatus::Active {
            self.movement.start(ctx);
        }
    }

    fn stop(&mut self, ctx: &mut TaskCtx<'_>) {
        self.movement.stop(ctx);
        self.state.deactivate();
    }

    fn status(&self) -> TaskStatus {
        self.state.status()
    }
}

/// Runs away from a target by steering toward the mirror point — the position
/// as far behind the agent as the target is in front.
///
/// Eligible when the target is within the view distance and visible; keeps
/// running until the target is left behind past the give-up distance or drops
/// out of sight.
#[derive(Debug)]
pub struct FleeTask {
    state: TaskState,
    target: AgentId,
    priority: Priority,
    view_distance: f32,
    give_up_distance: f32,
    movement: MoveTask,
}

impl FleeTask {
    pub fn new(target: AgentId, priority: i32, view_distance: f32, give_up_distance: f32, speed: f32) -> Self {
        debug_assert!(view_distance < give_up_distance, "view distance must sit inside the give-up distance");
        FleeTask {
            state: TaskState::new(),
            target,
            priority: Priority(priority),
            view_distance,
            give_up_distance,
            movement: MoveTask::new(Vec2::ZERO, speed),
        }
    }

    fn mirror_point(&self, ctx: &TaskCtx<'_>) -> Vec2 {
        let pos = ctx.pos();
        pos + (pos - ctx.store.position(self.target))
    }
}

impl Task for FleeTask {
    fn bind(&mut self, owner: AgentId) {
        self.state.bind(owner);
        self.movement.bind(owner);
    }

    fn priority(&self, ctx: &TaskCtx<'_>) -> TaskResult<Priority> {
        let distance = ctx.distance_to(self.target);
        let eligible = match self.state.status() {
            TaskStatus::Active => distance <= self.give_up_distance && ctx.can_see(self.target),
            TaskStatus::Inactive => distance < self.view_distance && ctx.can_see(self.target),
        };
        Ok(if eligible { self.priority } else { Priority::NONE })
    }

    fn start(&mut self, ctx: &mut TaskCtx<'_>) {
        self.state.activate();
        ctx.trigger(Event::FleeStart);
        let away = self.mirror_point(ctx);
        self.movement.set_target(away);
        self.movement.start(ctx);
    }

    fn update(&mut self, ctx: &mut TaskCtx<'_>) {
        let away = self.mirror_point(ctx);
        self.movement.set_target(away);
        self.movement.update(ctx);
        if self.movement.status() != TaskStatus::Active {
            self.movement.start(ctx);
        }
    }

    fn stop(&mut self, ctx: &mut TaskCtx<'_>) {
        self.movement.stop(ctx);
        self.state.deactivate();
    }

    fn status(&self) -> TaskStatus {
        self.state.status()
    }
}

/// Drags the target toward the owning agent while it stays inside the pull
/// radius.
///
/// Unlike the other pursuit tasks this one moves the *target*: each tick the
/// target is displaced toward the owner at the configured rate.  Eligible
/// while the target is inside the view distance and visible; the displacement
/// itself only applies inside the tighter pull radius.
#[derive(Debug)]
pub struct PullTask {
    state: TaskState,
    target: AgentId,
    priority: Priority,
    view_distance: f32,
    pull_distance: f32,
    /// Displacement applied to the target, in units per second.
    strength: f32,
    facing_left: Option<bool>,
}

impl PullTask {
    pub fn new(target: AgentId, priority: i32, view_distance: f32, pull_distance: f32, strength: f32) -> Self {
        debug_assert!(pull_distance <= view_distance, "pull radius must sit inside the view distance");
        PullTask {
            state: TaskState::new(),
            target,
            priority: Priority(priority),
            view_distance,
            pull_distance,
            strength,
            facing_left: None,
        }
    }
}

impl Task for PullTask {
    fn bind(&mut self, owner: AgentId) {
        self.state.bind(owner);
    }

    fn priority(&self, ctx: &TaskCtx<'_>) -> TaskResult<Priority> {
        let eligible = ctx.distance_to(self.target) < self.view_distance && ctx.can_see(self.target);
        Ok(if eligible { self.priority } else { Priority::NONE })
    }

    fn start(&mut self, ctx: &mut TaskCtx<'_>) {
        self.state.activate();
        self.facing_left = None;
        let target_x = ctx.store.position(self.target).x;
        self.facing_left = face(ctx, self.facing_left, target_x, Event::PullLeft, Event::PullRight);
    }

    fn update(&mut self, ctx: &mut TaskCtx<'_>) {
        if ctx.distance_to(self.target) > self.pull_distance {
            return;
        }
        let target_x = ctx.store.position(self.target).x;
        self.facing_left = face(ctx, self.facing_left, target_x, Event::PullLeft, Event::PullRight);

        let toward_owner = (ctx.center() - ctx.store.center(self.target)).normalized();
        let displaced = ctx.store.position(self.target) + toward_owner * (self.strength * ctx.dt());
        ctx.store.set_position(self.target, displaced);
    }

    fn stop(&mut self, _ctx: &mut TaskCtx<'_>) {
        self.state.deactivate();
    }

    fn status(&self) -> TaskStatus {
        self.state.status()
    }
}
