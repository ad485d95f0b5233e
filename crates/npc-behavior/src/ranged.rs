//! Ranged attackers and the projectiles they launch.
//!
//! Firing tasks announce shots with [`Event::ShotFired`]; actually placing a
//! projectile agent (and arming it with a [`ProjectileTask`]) is up to the
//! embedding game, which hears the event with full knowledge of shooter and
//! target.

use npc_core::{AgentId, Compass8, Rect, Vec2};
use npc_task::{MoveTask, Priority, Task, TaskCtx, TaskResult, TaskState, TaskStatus};
use npc_world::Event;

/// Shot cooldown bookkeeping against the simulation clock.
#[derive(Debug, Default)]
struct ShotTimer {
    last_shot_at: Option<f64>,
    shots_fired: u32,
}

impl ShotTimer {
    fn cooled_down(&self, now: f64, cooldown_secs: f32) -> bool {
        match self.last_shot_at {
            Some(at) => now - at > f64::from(cooldown_secs),
            None => true,
        }
    }

    fn record(&mut self, now: f64) {
        self.last_shot_at = Some(now);
        self.shots_fired += 1;
    }
}

/// Keeps its distance from the target — steering to the mirror point, clamped
/// to a bounds rectangle — while firing whenever its cooldown elapses or the
/// target slips out of fire range.
///
/// Eligible when the target is within the view distance *or* in line of
/// sight; once a skirmisher engages, it rarely lets go.
#[derive(Debug)]
pub struct SkirmishTask {
    state: TaskState,
    target: AgentId,
    priority: Priority,
    view_distance: f32,
    bounds: Rect,
    fire_range: f32,
    cooldown_secs: f32,
    movement: MoveTask,
    timer: ShotTimer,
    facing_left: Option<bool>,
}

impl SkirmishTask {
    pub fn new(
        target: AgentId,
        priority: i32,
        view_distance: f32,
        bounds: Rect,
        speed: f32,
        fire_range: f32,
        cooldown_secs: f32,
    ) -> Self {
        SkirmishTask {
            state: TaskState::new(),
            target,
            priority: Priority(priority),
            view_distance,
            bounds,
            fire_range,
            cooldown_secs,
            movement: MoveTask::new(Vec2::ZERO, speed),
            timer: ShotTimer::default(),
            facing_left: None,
        }
    }

    fn retreat_point(&self, ctx: &TaskCtx<'_>) -> Vec2 {
        let pos = ctx.pos();
        let mirror = pos + (pos - ctx.store.position(self.target));
        self.bounds.clamp(mirror)
    }
}

impl Task for SkirmishTask {
    fn bind(&mut self, owner: AgentId) {
        self.state.bind(owner);
        self.movement.bind(owner);
    }

    fn priority(&self, ctx: &TaskCtx<'_>) -> TaskResult<Priority> {
        let eligible =
            ctx.distance_to(self.target) < self.view_distance || ctx.can_see(self.target);
        Ok(if eligible { self.priority } else { Priority::NONE })
    }

    fn start(&mut self, ctx: &mut TaskCtx<'_>) {
        self.state.activate();
        ctx.trigger(Event::ChaseStart);
        let retreat = self.retreat_point(ctx);
        // Facing tracks the retreat direction, away from the target.
        let retreating_left = retreat.x < ctx.pos().x;
        ctx.trigger(if retreating_left { Event::ChaseLeft } else { Event::ChaseRight });
        self.facing_left = Some(retreating_left);
        // Cooldown runs from engagement, not from construction.
        self.timer.last_shot_at = Some(ctx.now_secs());
        self.movement.set_target(retreat);
        self.movement.start(ctx);
    }

    fn update(&mut self, ctx: &mut TaskCtx<'_>) {
        let retreat = self.retreat_point(ctx);
        self.movement.set_target(retreat);
        self.movement.update(ctx);
        if self.movement.status() != TaskStatus::Active {
            self.movement.start(ctx);
        }

        let now = ctx.now_secs();
        if self.timer.cooled_down(now, self.cooldown_secs)
            || ctx.distance_to(self.target) >= self.fire_range
        {
            self.timer.record(now);
            ctx.trigger(Event::ShotFired);
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

/// Chase with ranged attacks: pursues like a chase task and fires whenever
/// the target is inside fire range and the cooldown has elapsed.  The first
/// shot of an engagement always fires, cooldown or not.
#[derive(Debug)]
pub struct RangedChaseTask {
    state: TaskState,
    target: AgentId,
    priority: Priority,
    view_distance: f32,
    give_up_distance: f32,
    fire_range: f32,
    cooldown_secs: f32,
    movement: MoveTask,
    timer: ShotTimer,
    facing_left: Option<bool>,
}

impl RangedChaseTask {
    pub fn new(
        target: AgentId,
        priority: i32,
        view_distance: f32,
        give_up_distance: f32,
        fire_range: f32,
        cooldown_secs: f32,
        speed: f32,
    ) -> Self {
        debug_assert!(view_distance < give_up_distance, "view distance must sit inside the give-up distance");
        RangedChaseTask {
            state: TaskState::new(),
            target,
            priority: Priority(priority),
            view_distance,
            give_up_distance,
            fire_range,
            cooldown_secs,
            movement: MoveTask::new(Vec2::ZERO, speed),
            timer: ShotTimer::default(),
            facing_left: None,
        }
    }
}

impl Task for RangedChaseTask {
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
        let now_left = target_pos.x < ctx.pos().x;
        if self.facing_left != Some(now_left) {
            ctx.trigger(if now_left { Event::ChaseLeft } else { Event::ChaseRight });
            self.facing_left = Some(now_left);
        }

        self.movement.set_target(target_pos);
        self.movement.update(ctx);
        if self.movement.status() != TaskStatus::Active {
            self.movement.start(ctx);
        }

        let now = ctx.now_secs();
        let in_range = ctx.distance_to(self.target) <= self.fire_range;
        if (in_range && self.timer.cooled_down(now, self.cooldown_secs)) || self.timer.shots_fired == 0 {
            self.timer.record(now);
            ctx.trigger(Event::ShotFired);
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

/// Stationary turret behavior: fires at an in-range target on a fixed
/// cooldown.  The first shot always fires.  Proximity is the only gate; a
/// lobbed shot does not need line of sight.
#[derive(Debug)]
pub struct ShootTask {
    state: TaskState,
    target: AgentId,
    priority: Priority,
    range: f32,
    cooldown_secs: f32,
    timer: ShotTimer,
}

impl ShootTask {
    pub fn new(target: AgentId, priority: i32, range: f32, cooldown_secs: f32) -> Self {
        ShootTask {
            state: TaskState::new(),
            target,
            priority: Priority(priority),
            range,
            cooldown_secs,
            timer: ShotTimer::default(),
        }
    }
}

impl Task for ShootTask {
    fn bind(&mut self, owner: AgentId) {
        self.state.bind(owner);
    }

    fn priority(&self, ctx: &TaskCtx<'_>) -> TaskResult<Priority> {
        let eligible = ctx.distance_to(self.target) <= self.range;
        Ok(if eligible { self.priority } else { Priority::NONE })
    }

    fn start(&mut self, _ctx: &mut TaskCtx<'_>) {
        self.state.activate();
    }

    fn update(&mut self, ctx: &mut TaskCtx<'_>) {
        let now = ctx.now_secs();
        if self.timer.shots_fired == 0 || self.timer.cooled_down(now, self.cooldown_secs) {
            self.timer.record(now);
            ctx.trigger(Event::ShotFired);
        }
    }

    fn stop(&mut self, _ctx: &mut TaskCtx<'_>) {
        self.state.deactivate();
    }

    fn status(&self) -> TaskStatus {
        self.state.status()
    }
}

/// One-shot flight of a projectile agent to a point captured at launch.
///
/// Emits an 8-way heading event when the flight starts, so the embedder can
/// pick the right sprite, and disposes its own agent on arrival.
#[derive(Debug)]
pub struct ProjectileTask {
    state: TaskState,
    destination: Vec2,
    priority: Priority,
    movement: MoveTask,
    done: bool,
}

impl ProjectileTask {
    pub fn new(destination: Vec2, priority: i32, speed: f32) -> Self {
        ProjectileTask {
            state: TaskState::new(),
            destination,
            priority: Priority(priority),
            movement: MoveTask::new(destination, speed),
            done: false,
        }
    }
}

impl Task for ProjectileTask {
    fn bind(&mut self, owner: AgentId) {
        self.state.bind(owner);
        self.movement.bind(owner);
    }

    fn priority(&self, _ctx: &TaskCtx<'_>) -> TaskResult<Priority> {
        Ok(if self.done { Priority::NONE } else { self.priority })
    }

    fn start(&mut self, ctx: &mut TaskCtx<'_>) {
        self.state.activate();
        let heading = Compass8::from_delta(self.destination - ctx.pos());
        ctx.trigger(Event::ProjectileMove { heading });
        self.movement.set_target(self.destination);
        self.movement.start(ctx);
    }

    fn update(&mut self, ctx: &mut TaskCtx<'_>) {
        self.movement.update(ctx);
        if self.movement.status() == TaskStatus::Inactive {
            self.done = true;
            ctx.trigger(Event::ProjectileDone);
            ctx.store.dispose(ctx.agent);
            self.state.deactivate();
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
