//! Playback status.

use serde::{Deserialize, Serialize};

/// Where the player is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackStatus {
    /// Nothing requested yet, or released.
    Stopped,
    /// A play request is in flight.
    Loading,
    /// Audio is playing.
    Playing,
    /// Audio is paused with the playhead retained.
    Paused,
    /// The last play request failed; the next user action retries.
    Errored,
}

impl PlaybackStatus {
    /// Short label shown above the track title.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Loading => "Loading...",
            Self::Playing => "♪ Now Playing ♪",
            Self::Stopped | Self::Paused | Self::Errored => "Paused",
        }
    }
}
