//! Keepsake — host error types.

use keepsake_core::error::DomainError;
use thiserror::Error;

/// Startup and runtime errors for the terminal host.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The manifest could not be loaded or the deck could not be built.
    #[error("content error: {0}")]
    Content(#[from] DomainError),

    /// Terminal I/O failed.
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_converts_to_content_error() {
        let err: AppError = DomainError::Content("gallery has no photos".to_owned()).into();

        assert_eq!(
            err.to_string(),
            "content error: content error: gallery has no photos"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = AppError::Config("KEEPSAKE_TICK_MS must be positive".to_owned());

        assert_eq!(
            err.to_string(),
            "configuration error: KEEPSAKE_TICK_MS must be positive"
        );
    }
}
