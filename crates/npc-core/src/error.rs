//! Engine-wide error type.
//!
//! Sub-crates may define their own error enums and convert them into
//! `NpcError` via `From` impls, or keep them separate and wrap `NpcError` as
//! one variant.  Both patterns are acceptable; prefer whichever keeps error
//! sites clean.

use thiserror::Error;

use crate::{AgentId, ItemId};

/// The top-level error type for `npc-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum NpcError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("agent {0} is disposed")]
    AgentDisposed(AgentId),

    #[error("item {0} not found in registry")]
    ItemNotFound(ItemId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `npc-*` crates.
pub type NpcResult<T> = Result<T, NpcError>;
