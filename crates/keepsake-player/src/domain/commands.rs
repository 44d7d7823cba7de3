//! Commands for the media player.

use keepsake_core::command::Command;

/// User-issued player commands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerCommand {
    /// Play when paused or stopped, pause when playing.
    TogglePlayPause,
    /// Skip to the next track, wrapping after the last.
    Next,
    /// Skip to the previous track, wrapping before the first.
    Previous,
    /// Pick a track directly.
    SelectTrack {
        /// Zero-based playlist index.
        index: usize,
    },
    /// Move the playhead.
    Seek {
        /// Requested position in seconds; clamped to the track.
        seconds: f64,
    },
}

impl Command for PlayerCommand {
    fn command_type(&self) -> &'static str {
        match self {
            Self::TogglePlayPause => "player.toggle_play_pause",
            Self::Next => "player.next",
            Self::Previous => "player.previous",
            Self::SelectTrack { .. } => "player.select_track",
            Self::Seek { .. } => "player.seek",
        }
    }
}
