//! Query handlers for the media player.

use keepsake_core::machine::StateMachine;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::format::format_time;
use crate::domain::player::MediaPlayer;
use crate::domain::status::PlaybackStatus;

/// One row of the track list.
#[derive(Debug, Clone, Serialize)]
pub struct TrackRow {
    /// Zero-based playlist index.
    pub index: usize,
    /// Track title.
    pub title: String,
    /// Whether this is the current track.
    pub current: bool,
}

/// Read-only view of a media player.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    /// The session identifier.
    pub session_id: Uuid,
    /// Current status.
    pub status: PlaybackStatus,
    /// Label shown above the title.
    pub status_label: &'static str,
    /// Current track index.
    pub track_index: usize,
    /// Current track title.
    pub title: String,
    /// Current track cover locator.
    pub cover_image: String,
    /// Playhead as `m:ss`.
    pub position: String,
    /// Duration as `m:ss`.
    pub duration: String,
    /// Playhead as a fraction of the duration.
    pub progress: f64,
    /// Retry hint from the last failure.
    pub last_error: Option<String>,
    /// The full track list.
    pub tracks: Vec<TrackRow>,
    /// Current version (event count).
    pub version: i64,
}

/// Builds the view of `player`.
#[must_use]
pub fn get_player_view(player: &MediaPlayer) -> PlayerView {
    let track = player.current_track();
    PlayerView {
        session_id: player.id,
        status: player.status(),
        status_label: player.status().label(),
        track_index: player.current_track_index(),
        title: track.title.clone(),
        cover_image: track.cover_image.clone(),
        position: format_time(player.position_seconds()),
        duration: format_time(player.duration_seconds()),
        progress: player.progress(),
        last_error: player.last_error().map(str::to_owned),
        tracks: player
            .playlist()
            .tracks()
            .iter()
            .enumerate()
            .map(|(index, track)| TrackRow {
                index,
                title: track.title.clone(),
                current: index == player.current_track_index(),
            })
            .collect(),
        version: player.version(),
    }
}

#[cfg(test)]
mod tests {
    use keepsake_test_support::{FixedClock, test_epoch};

    use super::*;
    use crate::domain::playlist::fixtures::three_tracks;
    use crate::domain::ticket::PlayResolution;

    #[test]
    fn test_view_formats_times_and_marks_current_track() {
        // Arrange
        let clock = FixedClock(test_epoch());
        let mut player = MediaPlayer::open(three_tracks());
        let ticket = player.select_track(1, &clock).unwrap();
        player.resolve(
            &PlayResolution {
                ticket,
                result: Ok(()),
            },
            &clock,
        );
        player.on_metadata_loaded(200.0);
        player.on_position_changed(65.0);

        // Act
        let view = get_player_view(&player);

        // Assert
        assert_eq!(view.status_label, "♪ Now Playing ♪");
        assert_eq!(view.title, "If The World Was Ending");
        assert_eq!(view.position, "1:05");
        assert_eq!(view.duration, "3:20");
        assert!((view.progress - 0.325).abs() < 1e-9);
        let current: Vec<usize> = view
            .tracks
            .iter()
            .filter(|row| row.current)
            .map(|row| row.index)
            .collect();
        assert_eq!(current, vec![1]);
    }

    #[test]
    fn test_view_of_fresh_player() {
        let player = MediaPlayer::open(three_tracks());

        let view = get_player_view(&player);

        assert_eq!(view.status_label, "Paused");
        assert_eq!(view.duration, "0:00");
        assert_eq!(view.last_error, None);
        assert_eq!(view.version, 0);
    }
}
