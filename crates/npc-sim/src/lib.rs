//! `npc-sim` — the tick loop that drives agent schedulers.
//!
//! [`Sim`] owns the world (store, items, collaborator ports) plus one
//! [`TaskScheduler`][npc_task::TaskScheduler] and one deterministic RNG per
//! agent, and advances everything one fixed timestep at a time.
//! [`SimBuilder`] assembles and validates the pieces.
//!
//! # Crate layout
//!
//! | Module       | Contents                                           |
//! |--------------|----------------------------------------------------|
//! | [`sim`]      | `Sim` — the tick loop                              |
//! | [`builder`]  | `SimBuilder` — fluent, validated construction      |
//! | [`observer`] | `SimObserver` trait + `NoopObserver`               |
//! | [`recorder`] | `CsvEventRecorder` — event sink writing CSV rows   |
//! | [`error`]    | `SimError` / `SimResult`                           |

pub mod builder;
pub mod error;
pub mod observer;
pub mod recorder;
pub mod sim;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use recorder::CsvEventRecorder;
pub use sim::Sim;
