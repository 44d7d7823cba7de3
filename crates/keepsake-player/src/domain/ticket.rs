//! Play tickets: the generation-tagged handle of an in-flight play request.

use keepsake_core::audio::PlaybackError;
use keepsake_core::generation::Generation;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Message surfaced when playback fails after a track change.
pub const TRACK_CHANGE_FAILED_MESSAGE: &str = "Playback failed";

/// Message surfaced when a resume attempt fails.
pub const RESUME_FAILED_MESSAGE: &str = "Tap again to retry.";

/// What triggered a play request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayOrigin {
    /// A track was selected and playback resumes automatically.
    TrackChange,
    /// The user pressed play.
    Resume,
}

impl PlayOrigin {
    /// Retry hint shown when a request with this origin fails.
    #[must_use]
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::TrackChange => TRACK_CHANGE_FAILED_MESSAGE,
            Self::Resume => RESUME_FAILED_MESSAGE,
        }
    }
}

/// Identifies one play request.
///
/// A ticket is honoured only by the player session that issued it, and only
/// while its generation is still current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayTicket {
    /// The issuing player session.
    pub session_id: Uuid,
    /// Generation at issue time.
    pub generation: Generation,
    /// Track the request was made for.
    pub track_index: usize,
    /// What triggered the request.
    pub origin: PlayOrigin,
}

/// The backend's answer to a play request.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayResolution {
    /// The request being answered.
    pub ticket: PlayTicket,
    /// Backend outcome.
    pub result: Result<(), PlaybackError>,
}
