//! Simulation-level error type.

use thiserror::Error;

/// Errors raised while assembling or instrumenting a simulation.
#[derive(Debug, Error)]
pub enum SimError {
    /// A per-agent input had the wrong length.
    #[error("expected {expected} {what}, got {got}")]
    AgentCountMismatch {
        expected: usize,
        got: usize,
        what: &'static str,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("CSV output error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for the simulation layer.
pub type SimResult<T> = Result<T, SimError>;
