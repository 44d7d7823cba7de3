//! Audio backend abstraction.
//!
//! The player state machine never touches audio hardware. It issues calls on
//! an [`AudioBackend`] and receives [`BackendEvent`]s back through the host.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Recoverable failures reported by an audio backend.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum PlaybackError {
    /// The backend refused to start audio (platform policy, device busy).
    #[error("playback rejected: {0}")]
    PlaybackRejected(String),

    /// The source could not be reached or decoded.
    #[error("load failure: {0}")]
    LoadFailure(String),
}

/// Notifications emitted by the backend while a source is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BackendEvent {
    /// The playhead moved; carries the new position in seconds.
    PositionChanged(f64),
    /// Source metadata became available; carries the duration in seconds.
    MetadataLoaded(f64),
    /// The loaded source played to its end.
    Ended,
}

/// Backend contract consumed by the media player.
///
/// Implementations must tolerate `stop` being called repeatedly.
#[async_trait]
pub trait AudioBackend: Send + Sync {
    /// Replace the loaded source. Failures surface on the next `play`.
    fn load(&self, source: &str);

    /// Start or resume output of the loaded source.
    async fn play(&self) -> Result<(), PlaybackError>;

    /// Pause output, keeping the playhead.
    fn pause(&self);

    /// Move the playhead.
    fn set_position(&self, seconds: f64);

    /// Halt output and release the source.
    fn stop(&self);
}
