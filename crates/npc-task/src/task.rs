//! The `Task` trait — the main extension point for behavior code.

use npc_core::AgentId;

use crate::{Priority, TaskCtx, TaskResult};

/// Lifecycle status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TaskStatus {
    /// Not currently running.  Also how a running task reports completion.
    #[default]
    Inactive,
    /// Selected by the scheduler and running.
    Active,
}

/// A unit of agent behavior scheduled by priority.
///
/// Lifecycle: [`bind`][Task::bind] exactly once at wiring time, then any
/// number of `start` → `update`* → `stop` cycles driven by the scheduler.
/// `stop` is only called on a running task that is being preempted or shut
/// down; a task that completes on its own just reports
/// [`TaskStatus::Inactive`] from `status`.
///
/// Composite behaviors own their delegates (movement, wait) as plain fields
/// and forward lifecycle calls explicitly — there is no hidden tree.
pub trait Task {
    /// Attach the task to its owning agent.  Called once; binding twice or
    /// running an unbound task is a bug in wiring code and panics.
    fn bind(&mut self, owner: AgentId);

    /// The task's bid for this tick.  Return [`Priority::NONE`] when not
    /// eligible.  Errors are treated as `NONE` by the scheduler.
    fn priority(&self, ctx: &TaskCtx<'_>) -> TaskResult<Priority>;

    /// Called when the scheduler selects this task.
    fn start(&mut self, ctx: &mut TaskCtx<'_>);

    /// Called every tick while this task is the active one.
    fn update(&mut self, ctx: &mut TaskCtx<'_>);

    /// Called when a higher-priority task preempts this one.
    fn stop(&mut self, ctx: &mut TaskCtx<'_>);

    fn status(&self) -> TaskStatus;
}

// ── Shared plumbing ───────────────────────────────────────────────────────────

/// Owner and status bookkeeping shared by every task implementation.
///
/// Embed as a field and forward `bind`/`status` to it; the bind assertions
/// live here so each task gets them for free.
#[derive(Debug, Default)]
pub struct TaskState {
    owner: AgentId,
    status: TaskStatus,
}

impl TaskState {
    pub fn new() -> Self {
        TaskState { owner: AgentId::INVALID, status: TaskStatus::Inactive }
    }

    /// Record the owner.  Panics on rebind or an invalid id.
    pub fn bind(&mut self, owner: AgentId) {
        assert!(owner != AgentId::INVALID, "cannot bind a task to the invalid agent id");
        assert!(
            self.owner == AgentId::INVALID,
            "task is already bound to {}, refusing rebind to {owner}",
            self.owner
        );
        self.owner = owner;
    }

    /// The bound owner.  Panics if the task was never bound.
    #[inline]
    pub fn owner(&self) -> AgentId {
        assert!(self.owner != AgentId::INVALID, "task used before bind()");
        self.owner
    }

    #[inline]
    pub fn status(&self) -> TaskStatus {
        self.status
    }

    #[inline]
    pub fn activate(&mut self) {
        self.status = TaskStatus::Active;
    }

    #[inline]
    pub fn deactivate(&mut self) {
        self.status = TaskStatus::Inactive;
    }
}
