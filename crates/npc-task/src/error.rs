//! Task-layer error type.

use npc_core::NpcError;
use thiserror::Error;

/// Errors surfaced by task priority evaluation and lifecycle hooks.
///
/// The scheduler treats a failed priority evaluation as a `NONE` bid, so an
/// erroring task silently sits out the tick instead of poisoning arbitration.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("priority evaluation failed: {0}")]
    Priority(String),

    #[error(transparent)]
    World(#[from] NpcError),
}

/// Shorthand result type for the task layer.
pub type TaskResult<T> = Result<T, TaskError>;
