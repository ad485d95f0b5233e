//! `npc-world` — agent storage and collaborator ports for the `rust_npc`
//! behavior engine.
//!
//! Behaviors read and write the world exclusively through the types defined
//! here; everything that lives *outside* the engine (rendering, audio,
//! physics, UI) sits behind one of the port traits.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`store`]    | `AgentStore` — SoA per-agent state (positions, liveness, …)   |
//! | [`events`]   | `Event` enum, `EventSink` port, noop/recording sinks          |
//! | [`sensing`]  | `SensingPort` (line-of-sight), `ObstacleField` R-tree backend |
//! | [`registry`] | `ItemRegistry` — dynamic item id → agent mapping              |
//! | [`overlay`]  | `OverlaySurface` port for dialogue/hint overlays              |
//! | [`hints`]    | `HintCatalog` — per-agent dialogue lines with a fallback      |

pub mod events;
pub mod hints;
pub mod overlay;
pub mod registry;
pub mod sensing;
pub mod store;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use events::{Event, EventSink, NoopSink, RecordingSink};
pub use hints::HintCatalog;
pub use overlay::{NoopOverlay, OverlaySurface, RecordingOverlay};
pub use registry::ItemRegistry;
pub use sensing::{Blindfold, ObstacleField, OpenField, SensingPort};
pub use store::AgentStore;
