//! Cross-cutting error types for Redline.
//!
//! Domain-specific errors (`ReviewError`, `ExportError`) live in their own
//! crates. The CLI converges everything into `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any Redline crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A state machine transition was attempted that is not allowed.
    #[error("Invalid state transition: {entity_type} {id} from {from} to {to}")]
    InvalidTransition {
        entity_type: String,
        id: String,
        from: String,
        to: String,
    },

    /// Data failed validation (format, constraints, blank input).
    #[error("Validation error: {0}")]
    Validation(String),
}
