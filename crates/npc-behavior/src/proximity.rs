//! Proximity monitors: hooks fired as a target crosses a distance threshold,
//! plus the item interaction tasks built on them.

use npc_core::{AgentId, ItemId, OverlayId};
use npc_task::{Priority, Task, TaskCtx, TaskResult, TaskState, TaskStatus};
use npc_world::Event;

/// Callbacks for near/far transitions of a [`ProximityTask`].
pub trait ProximityHooks {
    /// Target crossed inside the threshold.
    fn on_approach(&mut self, ctx: &mut TaskCtx<'_>);

    /// Target crossed back outside the threshold.
    fn on_retreat(&mut self, ctx: &mut TaskCtx<'_>);

    /// Called every tick while the target stays inside the threshold.
    fn while_near(&mut self, _ctx: &mut TaskCtx<'_>) {}
}

/// Watches the distance between the owning agent and one target agent and
/// fires hooks on FAR → NEAR and NEAR → FAR transitions.
///
/// Bids a constant priority, so it runs whenever nothing more urgent does —
/// the usual arrangement is an agent whose only task this is.
#[derive(Debug)]
pub struct ProximityTask<H> {
    state: TaskState,
    target: AgentId,
    priority: Priority,
    threshold: f32,
    near: bool,
    hooks: H,
}

impl<H: ProximityHooks> ProximityTask<H> {
    pub fn new(target: AgentId, priority: i32, threshold: f32, hooks: H) -> Self {
        ProximityTask {
            state: TaskState::new(),
            target,
            priority: Priority(priority),
            threshold,
            near: false,
            hooks,
        }
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }
}

impl<H: ProximityHooks> Task for ProximityTask<H> {
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
        let close = ctx.distance_to(self.target) < self.threshold;
        if close && !self.near {
            self.near = true;
            self.hooks.on_approach(ctx);
        } else if !close && self.near {
            self.near = false;
            self.hooks.on_retreat(ctx);
        }
        if self.near {
            self.hooks.while_near(ctx);
        }
    }

    fn stop(&mut self, ctx: &mut TaskCtx<'_>) {
        if self.near {
            self.near = false;
            self.hooks.on_retreat(ctx);
        }
        self.state.deactivate();
    }

    fn status(&self) -> TaskStatus {
        self.state.status()
    }
}

// ── Item pickup ───────────────────────────────────────────────────────────────

/// Hook state for [`ItemPickupTask`].
#[derive(Debug)]
pub struct PickupHooks {
    observer: AgentId,
    item: ItemId,
    overlay_handle: Option<OverlayId>,
    taken: bool,
}

impl ProximityHooks for PickupHooks {
    fn on_approach(&mut self, ctx: &mut TaskCtx<'_>) {
        if self.taken {
            return;
        }
        let lines = ctx.hints.lines_for(ctx.agent).to_vec();
        self.overlay_handle = Some(ctx.overlay.show(&lines));
        ctx.trigger(Event::PromptShown);
    }

    fn on_retreat(&mut self, ctx: &mut TaskCtx<'_>) {
        if let Some(handle) = self.overlay_handle.take() {
            ctx.overlay.dismiss(handle);
            ctx.trigger(Event::PromptHidden);
        }
    }

    fn while_near(&mut self, ctx: &mut TaskCtx<'_>) {
        // Consume the signal even when already taken: activations against a
        // spent pickup must not leak to anyone else.
        let activated = ctx.store.take_signal(ctx.agent);
        if !activated || self.taken {
            return;
        }
        if ctx.items.remove(self.item).is_none() {
            // Someone else (a thief, say) got here first.
            self.taken = true;
            return;
        }
        self.taken = true;
        ctx.store.give_item(self.observer, self.item);
        ctx.trigger(Event::ItemPickedUp { item: self.item });
        if let Some(handle) = self.overlay_handle.take() {
            ctx.overlay.dismiss(handle);
            ctx.trigger(Event::PromptHidden);
        }
        ctx.store.dispose(ctx.agent);
    }
}

/// Task carried by a collectible item's agent.
///
/// Shows a pickup prompt while the observer is near; an external activation
/// signal transfers the item into the observer's inventory, removes it from
/// the registry and disposes the item agent.  Further activations are no-ops.
#[derive(Debug)]
pub struct ItemPickupTask {
    inner: ProximityTask<PickupHooks>,
}

impl ItemPickupTask {
    /// `observer` is the agent who can pick the item up (and whose distance
    /// gates the prompt); `item` is this agent's entry in the item registry.
    pub fn new(observer: AgentId, item: ItemId, priority: i32, threshold: f32) -> Self {
        let hooks = PickupHooks { observer, item, overlay_handle: None, taken: false };
        ItemPickupTask { inner: ProximityTask::new(observer, priority, threshold, hooks) }
    }

    /// Whether the item has already been collected.
    pub fn is_taken(&self) -> bool {
        self.inner.hooks().taken
    }
}

impl Task for ItemPickupTask {
    fn bind(&mut self, owner: AgentId) {
        self.inner.bind(owner);
    }

    fn priority(&self, ctx: &TaskCtx<'_>) -> TaskResult<Priority> {
        self.inner.priority(ctx)
    }

    fn start(&mut self, ctx: &mut TaskCtx<'_>) {
        self.inner.start(ctx);
    }

    fn update(&mut self, ctx: &mut TaskCtx<'_>) {
        self.inner.update(ctx);
    }

    fn stop(&mut self, ctx: &mut TaskCtx<'_>) {
        self.inner.stop(ctx);
    }

    fn status(&self) -> TaskStatus {
        self.inner.status()
    }
}

// ── Timed item use ────────────────────────────────────────────────────────────

/// Task carried by the agent that consumes an item for a timed effect.
///
/// An activation signal consumes the item (removing it from the registry and
/// disposing its carrier) and applies the effect; once the configured
/// duration elapses the expiry event fires and the task goes permanently
/// inert.
#[derive(Debug)]
pub struct TimedUseTask {
    state: TaskState,
    item: ItemId,
    priority: Priority,
    duration_secs: f32,
    expires_at: Option<f64>,
    expired: bool,
}

impl TimedUseTask {
    pub fn new(item: ItemId, priority: i32, duration_secs: f32) -> Self {
        TimedUseTask {
            state: TaskState::new(),
            item,
            priority: Priority(priority),
            duration_secs,
            expires_at: None,
            expired: false,
        }
    }

    /// Whether the effect is currently applied and not yet expired.
    pub fn is_effect_active(&self) -> bool {
        self.expires_at.is_some() && !self.expired
    }
}

impl Task for TimedUseTask {
    fn bind(&mut self, owner: AgentId) {
        self.state.bind(owner);
    }

    fn priority(&self, ctx: &TaskCtx<'_>) -> TaskResult<Priority> {
        if self.expired {
            return Ok(Priority::NONE);
        }
        let pending = ctx.store.has_signal(ctx.agent) || self.is_effect_active();
        Ok(if pending { self.priority } else { Priority::NONE })
    }

    fn start(&mut self, _ctx: &mut TaskCtx<'_>) {
        self.state.activate();
    }

    fn update(&mut self, ctx: &mut TaskCtx<'_>) {
        let activated = ctx.store.take_signal(ctx.agent);
        if activated && self.expires_at.is_none() {
            if let Some(carrier) = ctx.items.remove(self.item) {
                ctx.store.dispose(carrier);
            }
            self.expires_at = Some(ctx.now_secs() + f64::from(self.duration_secs));
            ctx.trigger(Event::EffectApplied);
        }

        if let Some(expires_at) = self.expires_at
            && !self.expired
            && ctx.now_secs() >= expires_at
        {
            self.expired = true;
            ctx.trigger(Event::EffectExpired);
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
