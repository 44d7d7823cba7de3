//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A command was rejected by domain validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// Presentation content (manifest, layout, track list) is malformed.
    #[error("content error: {0}")]
    Content(String),

    /// An infrastructure error (I/O, parsing of external files).
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
