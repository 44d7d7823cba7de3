//! Domain events for the media player.

use chrono::{DateTime, Utc};
use keepsake_core::audio::PlaybackError;
use keepsake_core::event::{DomainEvent, EventMetadata};
use keepsake_core::generation::Generation;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ticket::PlayOrigin;

/// Event type recorded when a track is selected.
pub const TRACK_SELECTED_EVENT_TYPE: &str = "player.track_selected";
/// Event type recorded when playback is requested from the backend.
pub const PLAY_REQUESTED_EVENT_TYPE: &str = "player.play_requested";
/// Event type recorded when the backend confirms playback.
pub const PLAYBACK_STARTED_EVENT_TYPE: &str = "player.playback_started";
/// Event type recorded when the backend rejects playback.
pub const PLAYBACK_FAILED_EVENT_TYPE: &str = "player.playback_failed";
/// Event type recorded when playback is paused.
pub const PLAYBACK_PAUSED_EVENT_TYPE: &str = "player.playback_paused";
/// Event type recorded when the playhead is moved by the user.
pub const SEEKED_EVENT_TYPE: &str = "player.seeked";
/// Event type recorded when the player is released.
pub const PLAYER_STOPPED_EVENT_TYPE: &str = "player.stopped";

/// Emitted when a track becomes current.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackSelected {
    /// Zero-based playlist index.
    pub track_index: usize,
    /// Stable track id.
    pub track_id: u32,
    /// Locator loaded into the backend.
    pub audio_source: String,
    /// Generation opened by this selection.
    pub generation: Generation,
}

/// Emitted when a play request is sent to the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayRequested {
    /// Track the request is for.
    pub track_index: usize,
    /// Generation of the request.
    pub generation: Generation,
    /// What triggered the request.
    pub origin: PlayOrigin,
}

/// Emitted when the backend confirms a current request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackStarted {
    /// Generation of the confirmed request.
    pub generation: Generation,
}

/// Emitted when the backend rejects a current request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackFailed {
    /// Generation of the rejected request.
    pub generation: Generation,
    /// Backend error.
    pub error: PlaybackError,
    /// Retry hint shown to the user.
    pub message: String,
}

/// Emitted when playback is paused.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackPaused {
    /// Playhead at the pause.
    pub position_seconds: f64,
}

/// Emitted when the user moves the playhead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seeked {
    /// Requested position.
    pub requested_seconds: f64,
    /// Position after clamping to the track.
    pub position_seconds: f64,
}

/// Emitted once when the player is released.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerStopped {
    /// Generation that invalidates every outstanding ticket.
    pub generation: Generation,
}

/// Event payload variants for the media player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PlayerEventKind {
    /// A track was selected.
    TrackSelected(TrackSelected),
    /// Playback was requested.
    PlayRequested(PlayRequested),
    /// Playback started.
    PlaybackStarted(PlaybackStarted),
    /// Playback failed.
    PlaybackFailed(PlaybackFailed),
    /// Playback paused.
    PlaybackPaused(PlaybackPaused),
    /// The playhead moved.
    Seeked(Seeked),
    /// The player was released.
    PlayerStopped(PlayerStopped),
}

impl PlayerEventKind {
    /// Returns the event type name for this payload.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::TrackSelected(_) => TRACK_SELECTED_EVENT_TYPE,
            Self::PlayRequested(_) => PLAY_REQUESTED_EVENT_TYPE,
            Self::PlaybackStarted(_) => PLAYBACK_STARTED_EVENT_TYPE,
            Self::PlaybackFailed(_) => PLAYBACK_FAILED_EVENT_TYPE,
            Self::PlaybackPaused(_) => PLAYBACK_PAUSED_EVENT_TYPE,
            Self::Seeked(_) => SEEKED_EVENT_TYPE,
            Self::PlayerStopped(_) => PLAYER_STOPPED_EVENT_TYPE,
        }
    }
}

/// Domain event envelope for the media player.
#[derive(Debug, Clone)]
pub struct PlayerEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: PlayerEventKind,
}

impl PlayerEvent {
    /// Builds an event envelope for `kind`.
    #[must_use]
    pub fn new(
        kind: PlayerEventKind,
        machine_id: Uuid,
        sequence_number: i64,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            metadata: EventMetadata::new(
                kind.event_type(),
                machine_id,
                sequence_number,
                occurred_at,
            ),
            kind,
        }
    }
}

impl DomainEvent for PlayerEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("PlayerEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
