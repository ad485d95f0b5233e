//! `npc-behavior` — the composite behaviors of the `rust_npc` engine.
//!
//! Every type here implements [`npc_task::Task`] and is built from the same
//! two delegates: [`MoveTask`][npc_task::MoveTask] for steering legs and
//! [`WaitTask`][npc_task::WaitTask] for timed pauses.  Composites own their
//! delegates as plain fields and drive them explicitly; when a delegate
//! finishes (or desynchronizes mid-pursuit) the composite restarts or swaps
//! it.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                        |
//! |---------------|-----------------------------------------------------------------|
//! | [`wander`]    | `WanderTask`, `CompassWanderTask`, `WanderIdleTask`             |
//! | [`pursuit`]   | `ChaseTask`, `FleeTask`, `PullTask`                             |
//! | [`stalk`]     | `StalkTask` — motion-gated biased wander                        |
//! | [`ranged`]    | `SkirmishTask`, `RangedChaseTask`, `ShootTask`, `ProjectileTask`|
//! | [`avoid`]     | `AvoidTask`                                                     |
//! | [`pause`]     | `PauseTask` — three-zone approach/pause/disengage machine       |
//! | [`proximity`] | `ProximityTask` + hooks, `ItemPickupTask`, `TimedUseTask`       |
//! | [`steal`]     | `StealTask` — seek / grab / return cycle over registry items    |
//! | [`spawn`]     | `SpawnTask`, `HiveTask`, `MinionSpawnTask`                      |

pub mod avoid;
pub mod pause;
pub mod proximity;
pub mod pursuit;
pub mod ranged;
pub mod spawn;
pub mod stalk;
pub mod steal;
pub mod wander;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use avoid::AvoidTask;
pub use pause::PauseTask;
pub use proximity::{ItemPickupTask, ProximityHooks, ProximityTask, TimedUseTask};
pub use pursuit::{ChaseTask, FleeTask, PullTask};
pub use ranged::{ProjectileTask, RangedChaseTask, ShootTask, SkirmishTask};
pub use spawn::{HiveTask, MinionSpawnTask, SpawnTask};
pub use stalk::StalkTask;
pub use steal::StealTask;
pub use wander::{CompassWanderTask, WanderIdleTask, WanderTask};
