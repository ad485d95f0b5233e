//! `npc-core` — foundational types for the `rust_npc` behavior engine.
//!
//! This crate is a dependency of every other `npc-*` crate.  It intentionally
//! has no `npc-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`ids`]     | `AgentId`, `ItemId`, `OverlayId`                          |
//! | [`vec2`]    | `Vec2`, `Rect`, compass discretization                    |
//! | [`time`]    | `Tick`, `GameClock`, `SimConfig`                          |
//! | [`rng`]     | `AgentRng` (per-agent deterministic RNG)                  |
//! | [`error`]   | `NpcError`, `NpcResult`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                        |
//! |---------|---------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.           |

pub mod error;
pub mod ids;
pub mod rng;
pub mod time;
pub mod vec2;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{NpcError, NpcResult};
pub use ids::{AgentId, ItemId, OverlayId};
pub use rng::AgentRng;
pub use time::{GameClock, SimConfig, Tick};
pub use vec2::{Compass5, Compass8, Rect, Vec2};
