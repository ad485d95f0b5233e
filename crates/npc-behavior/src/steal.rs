//! Thief behavior: cycle between home and the nearest registered item.

use npc_core::{AgentId, ItemId, Vec2};
use npc_task::{MoveTask, Priority, Task, TaskCtx, TaskResult, TaskState, TaskStatus, WaitTask};
use npc_world::Event;

/// Stealing is background behavior, same tier as wandering.
pub const STEAL_PRIORITY: Priority = Priority(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Waiting,
    Seeking { item: ItemId, carrier: AgentId },
    Returning,
}

/// Repeats: wait at home, walk to the nearest item in the registry, grab it
/// (into the thief's inventory, disposing the item's agent), carry it home,
/// wait again.
///
/// Home is the position at first activation.  Each walking leg announces its
/// horizontal direction relative to where the leg begins.  If the sought item
/// disappears mid-leg (picked up by someone else), the thief shrugs and goes
/// back to waiting.
#[derive(Debug)]
pub struct StealTask {
    state: TaskState,
    initial_wait_secs: f32,
    between_wait_secs: f32,
    origin: Vec2,
    started_once: bool,
    phase: Phase,
    movement: MoveTask,
    wait: WaitTask,
}

impl StealTask {
    pub fn new(initial_wait_secs: f32, between_wait_secs: f32, speed: f32) -> Self {
        StealTask {
            state: TaskState::new(),
            initial_wait_secs,
            between_wait_secs,
            origin: Vec2::ZERO,
            started_once: false,
            phase: Phase::Waiting,
            movement: MoveTask::new(Vec2::ZERO, speed),
            wait: WaitTask::new(initial_wait_secs),
        }
    }

    fn begin_wait(&mut self, ctx: &mut TaskCtx<'_>, secs: f32) {
        let mut wait = WaitTask::new(secs);
        wait.bind(self.state.owner());
        wait.start(ctx);
        self.wait = wait;
        self.phase = Phase::Waiting;
    }

    fn leg_direction_event(ctx: &mut TaskCtx<'_>, destination: Vec2) {
        if destination.x < ctx.pos().x {
            ctx.trigger(Event::WanderLeft);
        } else {
            ctx.trigger(Event::WanderRight);
        }
    }

    fn begin_seek(&mut self, ctx: &mut TaskCtx<'_>) {
        match ctx.items.nearest(ctx.center(), ctx.store) {
            Some((item, carrier, pos)) => {
                Self::leg_direction_event(ctx, pos);
                self.movement.set_target(pos);
                self.movement.start(ctx);
                self.phase = Phase::Seeking { item, carrier };
            }
            None => self.begin_wait(ctx, self.between_wait_secs),
        }
    }

    fn begin_return(&mut self, ctx: &mut TaskCtx<'_>) {
        Self::leg_direction_event(ctx, self.origin);
        self.movement.set_target(self.origin);
        self.movement.start(ctx);
        self.phase = Phase::Returning;
    }
}

impl Task for StealTask {
    fn bind(&mut self, owner: AgentId) {
        self.state.bind(owner);
        self.movement.bind(owner);
        self.wait.bind(owner);
    }

    fn priority(&self, _ctx: &TaskCtx<'_>) -> TaskResult<Priority> {
        Ok(STEAL_PRIORITY)
    }

    fn start(&mut self, ctx: &mut TaskCtx<'_>) {
        self.state.activate();
        if !self.started_once {
            self.started_once = true;
            self.origin = ctx.pos();
            self.wait.start(ctx);
            self.phase = Phase::Waiting;
        } else {
            // Resuming after preemption: head home and restart the cycle.
            self.begin_return(ctx);
        }
    }

    fn update(&mut self, ctx: &mut TaskCtx<'_>) {
        match self.phase {
            Phase::Waiting => {
                self.wait.update(ctx);
                if self.wait.status() == TaskStatus::Inactive {
                    self.begin_seek(ctx);
                }
            }
            Phase::Seeking { item, carrier } => {
                if ctx.items.get(item).is_none() {
                    self.begin_wait(ctx, self.between_wait_secs);
                    return;
                }
                self.movement.update(ctx);
                if self.movement.status() == TaskStatus::Inactive {
                    ctx.items.remove(item);
                    ctx.store.give_item(ctx.agent, item);
                    ctx.store.dispose(carrier);
                    ctx.trigger(Event::ItemStolen { item });
                    self.begin_return(ctx);
                }
            }
            Phase::Returning => {
                self.movement.update(ctx);
                if self.movement.status() == TaskStatus::Inactive {
                    self.begin_wait(ctx, self.between_wait_secs);
                }
            }
        }
    }

    fn stop(&mut self, ctx: &mut TaskCtx<'_>) {
        match self.phase {
            Phase::Waiting => self.wait.stop(ctx),
            Phase::Seeking { .. } | Phase::Returning => self.movement.stop(ctx),
        }
        self.state.deactivate();
    }

    fn status(&self) -> TaskStatus {
        self.state.status()
    }
}
