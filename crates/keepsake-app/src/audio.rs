//! Simulated audio output for the terminal host.
//!
//! Sources are resolved against a media root and must exist as files.
//! Nothing is decoded: the playhead advances with the host's ticks, and
//! metadata and end-of-track notifications are synthesised from the
//! declared track durations.

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use keepsake_content::domain::manifest::PlaylistContent;
use keepsake_core::audio::{AudioBackend, BackendEvent, PlaybackError};
use tracing::debug;

/// Duration assumed for tracks that do not declare one, in seconds.
pub const DEFAULT_TRACK_SECONDS: f64 = 180.0;

#[derive(Debug, Default)]
struct Output {
    source: Option<String>,
    path: PathBuf,
    available: bool,
    playing: bool,
    position: f64,
    duration: f64,
    metadata_pending: bool,
}

/// An [`AudioBackend`] that keeps time instead of producing sound.
#[derive(Debug)]
pub struct SimulatedAudioBackend {
    media_root: PathBuf,
    playlist: PlaylistContent,
    output: Mutex<Output>,
}

impl SimulatedAudioBackend {
    /// Creates a backend resolving sources under `media_root`, with the
    /// durations declared in `playlist`.
    #[must_use]
    pub fn new(media_root: PathBuf, playlist: &PlaylistContent) -> Self {
        Self {
            media_root,
            playlist: playlist.clone(),
            output: Mutex::new(Output::default()),
        }
    }

    /// Whether audio is currently being "played".
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.output().playing
    }

    /// Advances the playhead by `elapsed` and returns the notifications the
    /// player should receive, in order.
    pub fn advance(&self, elapsed: Duration) -> Vec<BackendEvent> {
        let mut output = self.output();
        let mut events = Vec::new();
        if output.source.is_none() || !output.available {
            return events;
        }
        if output.metadata_pending {
            output.metadata_pending = false;
            events.push(BackendEvent::MetadataLoaded(output.duration));
        }
        if output.playing {
            output.position = (output.position + elapsed.as_secs_f64()).min(output.duration);
            events.push(BackendEvent::PositionChanged(output.position));
            if output.position >= output.duration {
                output.playing = false;
                events.push(BackendEvent::Ended);
            }
        }
        events
    }

    fn output(&self) -> MutexGuard<'_, Output> {
        self.output.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl AudioBackend for SimulatedAudioBackend {
    fn load(&self, source: &str) {
        let path = self.media_root.join(source);
        let available = path.is_file();
        let duration = self
            .playlist
            .duration_of(source)
            .unwrap_or(DEFAULT_TRACK_SECONDS);
        debug!(source, path = %path.display(), available, "audio source loaded");

        let mut output = self.output();
        *output = Output {
            source: Some(source.to_owned()),
            path,
            available,
            playing: false,
            position: 0.0,
            duration,
            metadata_pending: available,
        };
    }

    async fn play(&self) -> Result<(), PlaybackError> {
        let mut output = self.output();
        if output.source.is_none() {
            return Err(PlaybackError::LoadFailure("no source loaded".to_owned()));
        }
        if !output.available {
            return Err(PlaybackError::LoadFailure(format!(
                "{} not found",
                output.path.display()
            )));
        }
        if output.position >= output.duration {
            output.position = 0.0;
        }
        output.playing = true;
        Ok(())
    }

    fn pause(&self) {
        self.output().playing = false;
    }

    fn set_position(&self, seconds: f64) {
        let mut output = self.output();
        output.position = seconds.clamp(0.0, output.duration);
    }

    fn stop(&self) {
        *self.output() = Output::default();
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use keepsake_content::domain::manifest::TrackEntry;
    use tempfile::TempDir;

    use super::*;

    fn media_with_file(name: &str) -> TempDir {
        let media = TempDir::new().unwrap();
        fs::write(media.path().join(name), b"not really audio").unwrap();
        media
    }

    fn playlist(source: &str, duration: Option<f64>) -> PlaylistContent {
        PlaylistContent {
            title: "Songs".to_owned(),
            tracks: vec![TrackEntry {
                id: 1,
                title: "Song".to_owned(),
                audio_source: source.to_owned(),
                cover_image: "cover.jpg".to_owned(),
                duration_seconds: duration,
            }],
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_load_failure() {
        let backend = SimulatedAudioBackend::new(
            PathBuf::from("/nonexistent/keepsake"),
            &playlist("a.mp3", None),
        );
        backend.load("a.mp3");

        let result = backend.play().await;

        assert!(matches!(result, Err(PlaybackError::LoadFailure(m)) if m.contains("not found")));
        assert!(backend.advance(Duration::from_secs(1)).is_empty());
    }

    #[tokio::test]
    async fn test_play_without_source_is_load_failure() {
        let backend = SimulatedAudioBackend::new(PathBuf::from("."), &playlist("a.mp3", None));

        assert!(backend.play().await.is_err());
    }

    #[tokio::test]
    async fn test_playback_reports_metadata_position_and_end() {
        // Arrange
        let media = media_with_file("short.mp3");
        let backend = SimulatedAudioBackend::new(media.path().to_path_buf(), &playlist("short.mp3", Some(2.0)));
        backend.load("short.mp3");
        backend.play().await.unwrap();

        // Act
        let first = backend.advance(Duration::from_millis(1_500));
        let second = backend.advance(Duration::from_millis(1_500));

        // Assert
        assert_eq!(
            first,
            vec![
                BackendEvent::MetadataLoaded(2.0),
                BackendEvent::PositionChanged(1.5)
            ]
        );
        assert_eq!(
            second,
            vec![BackendEvent::PositionChanged(2.0), BackendEvent::Ended]
        );
        assert!(!backend.is_playing());
    }

    #[tokio::test]
    async fn test_undeclared_duration_uses_default() {
        let media = media_with_file("long.mp3");
        let backend = SimulatedAudioBackend::new(media.path().to_path_buf(), &playlist("other.mp3", None));
        backend.load("long.mp3");

        let events = backend.advance(Duration::ZERO);

        assert_eq!(events, vec![BackendEvent::MetadataLoaded(DEFAULT_TRACK_SECONDS)]);
    }

    #[tokio::test]
    async fn test_pause_and_stop_halt_the_playhead() {
        let media = media_with_file("paused.mp3");
        let backend = SimulatedAudioBackend::new(media.path().to_path_buf(), &playlist("paused.mp3", None));
        backend.load("paused.mp3");
        backend.play().await.unwrap();
        backend.advance(Duration::from_secs(1));

        backend.pause();
        let paused = backend.advance(Duration::from_secs(1));
        backend.stop();
        let stopped = backend.advance(Duration::from_secs(1));

        assert!(paused.is_empty());
        assert!(stopped.is_empty());
        assert!(!backend.is_playing());
    }
}
