//! Straight-line steering delegate.

use npc_core::{AgentId, Vec2};

use crate::{Priority, Task, TaskCtx, TaskResult, TaskState, TaskStatus};

/// Arrival tolerance used when no explicit stop distance is configured.
pub const DEFAULT_STOP_DISTANCE: f32 = 0.01;

/// Moves the owning agent toward a target point at constant speed.
///
/// Advances `speed × Δt` each tick, clamped so the agent never overshoots the
/// target.  Reports [`TaskStatus::Inactive`] once within the stop distance.
/// Never bids for scheduling on its own (`priority` is `NONE`) — composites
/// own it as a delegate and drive it directly.
#[derive(Debug)]
pub struct MoveTask {
    state: TaskState,
    target: Vec2,
    speed: f32,
    stop_distance: f32,
}

impl MoveTask {
    pub fn new(target: Vec2, speed: f32) -> Self {
        MoveTask {
            state: TaskState::new(),
            target,
            speed,
            stop_distance: DEFAULT_STOP_DISTANCE,
        }
    }

    pub fn with_stop_distance(mut self, stop_distance: f32) -> Self {
        self.stop_distance = stop_distance;
        self
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// Redirect mid-flight.  Retargeting a stopped task leaves it stopped;
    /// the owning composite restarts it.
    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
    }

    fn at_target(&self, position: Vec2) -> bool {
        position.distance(self.target) <= self.stop_distance
    }
}

impl Task for MoveTask {
    fn bind(&mut self, owner: AgentId) {
        self.state.bind(owner);
    }

    fn priority(&self, _ctx: &TaskCtx<'_>) -> TaskResult<Priority> {
        Ok(Priority::NONE)
    }

    fn start(&mut self, ctx: &mut TaskCtx<'_>) {
        let owner = self.state.owner();
        if self.at_target(ctx.store.position(owner)) {
            self.state.deactivate();
        } else {
            self.state.activate();
        }
    }

    fn update(&mut self, ctx: &mut TaskCtx<'_>) {
        if self.state.status() != TaskStatus::Active {
            return;
        }
        let owner = self.state.owner();
        let position = ctx.store.position(owner);
        let delta = self.target - position;
        let distance = delta.length();

        if distance <= self.stop_distance {
            self.state.deactivate();
            return;
        }

        let step = self.speed * ctx.dt();
        let next = if step >= distance {
            self.target
        } else {
            position + delta.normalized() * step
        };
        ctx.store.set_position(owner, next);

        if self.at_target(next) {
            self.state.deactivate();
        }
    }

    fn stop(&mut self, _ctx: &mut TaskCtx<'_>) {
        self.state.deactivate();
    }

    fn status(&self) -> TaskStatus {
        self.state.status()
    }
}
