//! `npc-task` — the task abstraction and priority arbitration core of the
//! `rust_npc` behavior engine.
//!
//! A [`Task`] is a unit of agent behavior with a lifecycle
//! (`start` / `update` / `stop`) and a per-tick [`Priority`] bid.  The
//! [`TaskScheduler`] owns one ordered list of tasks per agent and, each tick,
//! runs exactly the highest bidder — stopping the incumbent before starting
//! the winner, so at most one task is ever active.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`task`]      | `Task` trait, `TaskStatus`, `TaskState` plumbing           |
//! | [`priority`]  | `Priority` newtype with the `NONE` ineligibility sentinel  |
//! | [`context`]   | `TaskCtx` — per-tick world/collaborator bundle             |
//! | [`scheduler`] | `TaskScheduler` — per-agent arbitration loop               |
//! | [`movement`]  | `MoveTask` — straight-line steering delegate               |
//! | [`wait`]      | `WaitTask` — fixed-duration timer delegate                 |
//! | [`error`]     | `TaskError` / `TaskResult`                                 |

pub mod context;
pub mod error;
pub mod movement;
pub mod priority;
pub mod scheduler;
pub mod task;
pub mod wait;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use context::TaskCtx;
pub use error::{TaskError, TaskResult};
pub use movement::MoveTask;
pub use priority::Priority;
pub use scheduler::TaskScheduler;
pub use task::{Task, TaskState, TaskStatus};
pub use wait::WaitTask;
