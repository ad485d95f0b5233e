//! Sidestep behavior: keep a minimum distance from a threat.

use npc_core::{AgentId, Vec2};
use npc_task::{MoveTask, Priority, Task, TaskCtx, TaskResult, TaskState, TaskStatus};
use npc_world::Event;

/// Steers away from a threat whenever it comes inside the trigger distance.
///
/// Eligibility is binary: inside the trigger distance with line of sight the
/// task bids its configured priority, otherwise it bids the ineligibility
/// sentinel.  An unseen threat is not avoided, no matter how close.  While
/// running, it retargets each tick to a point `avoid_distance` directly away
/// from the threat.
#[derive(Debug)]
pub struct AvoidTask {
    state: TaskState,
    threat: AgentId,
    priority: Priority,
    trigger_distance: f32,
    avoid_distance: f32,
    movement: MoveTask,
}

impl AvoidTask {
    pub fn new(threat: AgentId, priority: i32, trigger_distance: f32, avoid_distance: f32, speed: f32) -> Self {
        AvoidTask {
            state: TaskState::new(),
            threat,
            priority: Priority(priority),
            trigger_distance,
            avoid_distance,
            movement: MoveTask::new(Vec2::ZERO, speed),
        }
    }

    fn escape_point(&self, ctx: &TaskCtx<'_>) -> Vec2 {
        let pos = ctx.pos();
        let away = (pos - ctx.store.position(self.threat)).normalized();
        // A threat sitting exactly on top of us gives a zero direction; fall
        // back to stepping east.
        let away = if away == Vec2::ZERO { Vec2::new(1.0, 0.0) } else { away };
        pos + away * self.avoid_distance
    }
}

impl Task for AvoidTask {
    fn bind(&mut self, owner: AgentId) {
        self.state.bind(owner);
        self.movement.bind(owner);
    }

    fn priority(&self, ctx: &TaskCtx<'_>) -> TaskResult<Priority> {
        let eligible = ctx.distance_to(self.threat) < self.trigger_distance && ctx.can_see(self.threat);
        Ok(if eligible { self.priority } else { Priority::NONE })
    }

    fn start(&mut self, ctx: &mut TaskCtx<'_>) {
        self.state.activate();
        ctx.trigger(Event::AvoidStart);
        let escape = self.escape_point(ctx);
        self.movement.set_target(escape);
        self.movement.start(ctx);
    }

    fn update(&mut self, ctx: &mut TaskCtx<'_>) {
        let escape = self.escape_point(ctx);
        self.movement.set_target(escape);
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
