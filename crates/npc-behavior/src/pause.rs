//! Friendly NPC that walks up to the player and pauses with a hint overlay.

use npc_core::{AgentId, OverlayId, Vec2};
use npc_task::{MoveTask, Priority, Task, TaskCtx, TaskResult, TaskState, TaskStatus};
use npc_world::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Zone {
    Approaching,
    Paused,
}

/// Three-zone approach machine around a target:
///
/// - inside the view distance the task becomes eligible and walks toward the
///   target;
/// - inside the (smaller) pause distance it stops and shows its hint overlay;
/// - only past the (larger) disengage distance does a running task lose
///   eligibility, so the overlay doesn't flicker at the view boundary.
///
/// The overlay handle is owned here: whichever path deactivates the task
/// (zone exit or preemption) dismisses the overlay exactly once.
#[derive(Debug)]
pub struct PauseTask {
    state: TaskState,
    target: AgentId,
    priority: Priority,
    pause_distance: f32,
    view_distance: f32,
    disengage_distance: f32,
    movement: MoveTask,
    zone: Zone,
    overlay_handle: Option<OverlayId>,
}

impl PauseTask {
    pub fn new(
        target: AgentId,
        priority: i32,
        pause_distance: f32,
        view_distance: f32,
        disengage_distance: f32,
        speed: f32,
    ) -> Self {
        debug_assert!(
            pause_distance < view_distance && view_distance < disengage_distance,
            "thresholds must be ordered pause < view < disengage"
        );
        PauseTask {
            state: TaskState::new(),
            target,
            priority: Priority(priority),
            pause_distance,
            view_distance,
            disengage_distance,
            movement: MoveTask::new(Vec2::ZERO, speed),
            zone: Zone::Approaching,
            overlay_handle: None,
        }
    }

    fn dismiss_overlay(&mut self, ctx: &mut TaskCtx<'_>) {
        if let Some(handle) = self.overlay_handle.take() {
            ctx.overlay.dismiss(handle);
            ctx.trigger(Event::PauseEnd);
        }
    }
}

impl Task for PauseTask {
    fn bind(&mut self, owner: AgentId) {
        self.state.bind(owner);
        self.movement.bind(owner);
    }

    fn priority(&self, ctx: &TaskCtx<'_>) -> TaskResult<Priority> {
        let distance = ctx.distance_to(self.target);
        let eligible = match self.state.status() {
            TaskStatus::Active => distance <= self.disengage_distance,
            TaskStatus::Inactive => distance < self.view_distance && ctx.can_see(self.target),
        };
        Ok(if eligible { self.priority } else { Priority::NONE })
    }

    fn start(&mut self, ctx: &mut TaskCtx<'_>) {
        self.state.activate();
        self.zone = Zone::Approaching;
        ctx.trigger(Event::PauseStart);
        self.movement.set_target(ctx.store.position(self.target));
        self.movement.start(ctx);
    }

    fn update(&mut self, ctx: &mut TaskCtx<'_>) {
        let distance = ctx.distance_to(self.target);
        match self.zone {
            Zone::Approaching => {
                if distance <= self.pause_distance {
                    self.movement.stop(ctx);
                    self.zone = Zone::Paused;
                    ctx.trigger(Event::Paused);
                    let lines = ctx.hints.lines_for(ctx.agent).to_vec();
                    self.overlay_handle = Some(ctx.overlay.show(&lines));
                } else {
                    self.movement.set_target(ctx.store.position(self.target));
                    self.movement.update(ctx);
                    if self.movement.status() != TaskStatus::Active {
                        self.movement.start(ctx);
                    }
                }
            }
            Zone::Paused => {
                if distance > self.pause_distance {
                    self.dismiss_overlay(ctx);
                    self.zone = Zone::Approaching;
                    self.movement.set_target(ctx.store.position(self.target));
                    self.movement.start(ctx);
                }
            }
        }
    }

    fn stop(&mut self, ctx: &mut TaskCtx<'_>) {
        self.dismiss_overlay(ctx);
        self.movement.stop(ctx);
        self.state.deactivate();
    }

    fn status(&self) -> TaskStatus {
        self.state.status()
    }
}
