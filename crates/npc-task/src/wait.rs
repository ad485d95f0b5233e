//! Fixed-duration timer delegate.

use npc_core::AgentId;

use crate::{Priority, Task, TaskCtx, TaskResult, TaskState, TaskStatus};

/// Does nothing for a configured number of seconds, then completes.
///
/// Like [`MoveTask`][crate::MoveTask], it never bids on its own; composites
/// drive it as a delegate.
#[derive(Debug)]
pub struct WaitTask {
    state: TaskState,
    duration_secs: f32,
    elapsed_secs: f32,
}

impl WaitTask {
    pub fn new(duration_secs: f32) -> Self {
        WaitTask { state: TaskState::new(), duration_secs, elapsed_secs: 0.0 }
    }

    /// Seconds remaining before completion.
    pub fn remaining_secs(&self) -> f32 {
        (self.duration_secs - self.elapsed_secs).max(0.0)
    }
}

impl Task for WaitTask {
    fn bind(&mut self, owner: AgentId) {
        self.state.bind(owner);
    }

    fn priority(&self, _ctx: &TaskCtx<'_>) -> TaskResult<Priority> {
        Ok(Priority::NONE)
    }

    fn start(&mut self, _ctx: &mut TaskCtx<'_>) {
        self.elapsed_secs = 0.0;
        if self.duration_secs <= 0.0 {
            self.state.deactivate();
        } else {
            self.state.activate();
        }
    }

    fn update(&mut self, ctx: &mut TaskCtx<'_>) {
        if self.state.status() != TaskStatus::Active {
            return;
        }
        self.elapsed_secs += ctx.dt();
        if self.elapsed_secs >= self.duration_secs {
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
