//! Player session: binds a `MediaPlayer` to an audio backend for the
//! lifetime of one playlist-scene mount.
//!
//! Play requests run as spawned tasks; their answers come back through the
//! host's resolution channel and are fed to [`PlayerSession::resolve`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use keepsake_core::audio::{AudioBackend, BackendEvent};
use keepsake_core::clock::Clock;
use keepsake_core::error::DomainError;
use keepsake_core::machine::StateMachine;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::events::PlayerEvent;
use crate::domain::player::{MediaPlayer, ToggleOutcome};
use crate::domain::playlist::Playlist;
use crate::domain::ticket::{PlayResolution, PlayTicket};

/// Exclusive handle on the audio backend.
///
/// Output stops exactly once: on [`AudioOutput::release`] or on drop,
/// whichever comes first. Play tasks check `live` before starting audio and
/// again once the backend answers, stopping output that started after
/// release.
struct AudioOutput {
    backend: Arc<dyn AudioBackend>,
    live: Arc<AtomicBool>,
}

impl AudioOutput {
    fn new(backend: Arc<dyn AudioBackend>) -> Self {
        Self {
            backend,
            live: Arc::new(AtomicBool::new(true)),
        }
    }

    fn release(&self) {
        if self.live.swap(false, Ordering::AcqRel) {
            self.backend.stop();
        }
    }
}

impl Drop for AudioOutput {
    fn drop(&mut self) {
        self.release();
    }
}

/// A mounted player and the audio output it exclusively owns.
pub struct PlayerSession {
    player: MediaPlayer,
    output: AudioOutput,
    resolutions: UnboundedSender<PlayResolution>,
}

impl PlayerSession {
    /// Opens a session on the first track. The source is loaded but not
    /// played.
    pub fn open(
        playlist: Playlist,
        backend: Arc<dyn AudioBackend>,
        resolutions: UnboundedSender<PlayResolution>,
    ) -> Self {
        let player = MediaPlayer::open(playlist);
        backend.load(&player.current_track().audio_source);
        info!(session_id = %player.id, tracks = player.playlist().len(), "player session opened");
        Self {
            player,
            output: AudioOutput::new(backend),
            resolutions,
        }
    }

    /// Session identifier.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.player.id
    }

    /// Read access to the player state.
    #[must_use]
    pub fn player(&self) -> &MediaPlayer {
        &self.player
    }

    /// Pauses or requests playback.
    pub fn toggle_play_pause(&mut self, clock: &dyn Clock) -> ToggleOutcome {
        let outcome = self.player.toggle_play_pause(clock);
        match outcome {
            ToggleOutcome::Paused => self.output.backend.pause(),
            ToggleOutcome::PlayRequested(ticket) => self.spawn_play(ticket),
            ToggleOutcome::Ignored => {}
        }
        outcome
    }

    /// Switches to the track at `index` and starts it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `index` is outside the playlist
    /// or the session is closed.
    pub fn select_track(
        &mut self,
        index: usize,
        clock: &dyn Clock,
    ) -> Result<PlayTicket, DomainError> {
        let ticket = self.player.select_track(index, clock)?;
        self.load_and_play(ticket);
        Ok(ticket)
    }

    /// Switches to the following track, wrapping.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the session is closed.
    pub fn next(&mut self, clock: &dyn Clock) -> Result<PlayTicket, DomainError> {
        let ticket = self.player.next(clock)?;
        self.load_and_play(ticket);
        Ok(ticket)
    }

    /// Switches to the preceding track, wrapping.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the session is closed.
    pub fn previous(&mut self, clock: &dyn Clock) -> Result<PlayTicket, DomainError> {
        let ticket = self.player.previous(clock)?;
        self.load_and_play(ticket);
        Ok(ticket)
    }

    /// Moves the playhead and returns the clamped position.
    pub fn seek(&mut self, seconds: f64, clock: &dyn Clock) -> f64 {
        let position = self.player.seek(seconds, clock);
        if !self.player.is_released() {
            self.output.backend.set_position(position);
        }
        position
    }

    /// Feeds a backend notification into the player. `Ended` advances to the
    /// next track.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the track ends after close.
    pub fn on_backend_event(
        &mut self,
        event: BackendEvent,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        match event {
            BackendEvent::PositionChanged(seconds) => self.player.on_position_changed(seconds),
            BackendEvent::MetadataLoaded(duration) => self.player.on_metadata_loaded(duration),
            BackendEvent::Ended => {
                let ticket = self.player.on_track_ended(clock)?;
                self.load_and_play(ticket);
            }
        }
        Ok(())
    }

    /// Applies a play resolution. Returns `false` for stale resolutions.
    pub fn resolve(&mut self, resolution: &PlayResolution, clock: &dyn Clock) -> bool {
        self.player.resolve(resolution, clock)
    }

    /// Drains the player events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<PlayerEvent> {
        self.player.take_uncommitted_events()
    }

    /// Stops audio, invalidates outstanding tickets and returns the remaining
    /// events.
    pub fn close(mut self, clock: &dyn Clock) -> Vec<PlayerEvent> {
        self.player.release(clock);
        self.output.release();
        info!(session_id = %self.player.id, "player session closed");
        self.player.take_uncommitted_events()
    }

    fn load_and_play(&self, ticket: PlayTicket) {
        self.output
            .backend
            .load(&self.player.current_track().audio_source);
        self.spawn_play(ticket);
    }

    fn spawn_play(&self, ticket: PlayTicket) {
        let backend = Arc::clone(&self.output.backend);
        let live = Arc::clone(&self.output.live);
        let resolutions = self.resolutions.clone();
        tokio::spawn(async move {
            if !live.load(Ordering::Acquire) {
                debug!(generation = %ticket.generation, "play skipped after release");
                return;
            }
            let result = backend.play().await;
            if result.is_ok() && !live.load(Ordering::Acquire) {
                debug!(
                    generation = %ticket.generation,
                    "play finished after release, stopping output"
                );
                backend.stop();
            }
            if resolutions.send(PlayResolution { ticket, result }).is_err() {
                debug!(generation = %ticket.generation, "resolution channel closed");
            }
        });
    }
}

impl std::fmt::Debug for PlayerSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerSession")
            .field("player", &self.player)
            .field("live", &self.output.live.load(Ordering::Acquire))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::playlist::fixtures::three_tracks;
    use crate::domain::status::PlaybackStatus;
    use crate::domain::ticket::RESUME_FAILED_MESSAGE;
    use keepsake_core::audio::PlaybackError;
    use keepsake_test_support::{
        AudioCall, FailingAudioBackend, FixedClock, GatedAudioBackend, RecordingAudioBackend,
        test_epoch,
    };
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    fn open_session(
        backend: Arc<dyn AudioBackend>,
    ) -> (PlayerSession, UnboundedReceiver<PlayResolution>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (PlayerSession::open(three_tracks(), backend, tx), rx)
    }

    #[tokio::test]
    async fn test_open_loads_first_track_without_playing() {
        // Arrange
        let backend = Arc::new(RecordingAudioBackend::new());

        // Act
        let (session, _rx) = open_session(backend.clone());

        // Assert
        assert_eq!(session.player().status(), PlaybackStatus::Stopped);
        assert_eq!(
            backend.calls(),
            vec![AudioCall::Load("music/track1.mp3".to_owned())]
        );
    }

    #[tokio::test]
    async fn test_toggle_plays_after_resolution() {
        // Arrange
        let clock = FixedClock(test_epoch());
        let backend = Arc::new(RecordingAudioBackend::new());
        let (mut session, mut rx) = open_session(backend.clone());

        // Act
        let outcome = session.toggle_play_pause(&clock);
        let resolution = rx.recv().await.unwrap();
        let applied = session.resolve(&resolution, &clock);

        // Assert
        assert!(matches!(outcome, ToggleOutcome::PlayRequested(_)));
        assert!(applied);
        assert_eq!(session.player().status(), PlaybackStatus::Playing);
        assert!(backend.calls().contains(&AudioCall::Play));
    }

    #[tokio::test]
    async fn test_toggle_failure_surfaces_retry_message() {
        let clock = FixedClock(test_epoch());
        let (mut session, mut rx) = open_session(Arc::new(FailingAudioBackend));

        session.toggle_play_pause(&clock);
        let resolution = rx.recv().await.unwrap();
        session.resolve(&resolution, &clock);

        assert_eq!(session.player().status(), PlaybackStatus::Errored);
        assert_eq!(session.player().last_error(), Some(RESUME_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn test_pause_reaches_backend() {
        let clock = FixedClock(test_epoch());
        let backend = Arc::new(RecordingAudioBackend::new());
        let (mut session, mut rx) = open_session(backend.clone());
        session.toggle_play_pause(&clock);
        let resolution = rx.recv().await.unwrap();
        session.resolve(&resolution, &clock);

        let outcome = session.toggle_play_pause(&clock);

        assert_eq!(outcome, ToggleOutcome::Paused);
        assert_eq!(backend.calls().last(), Some(&AudioCall::Pause));
    }

    #[tokio::test]
    async fn test_next_loads_new_source_and_resumes() {
        // Arrange
        let clock = FixedClock(test_epoch());
        let backend = Arc::new(RecordingAudioBackend::new());
        let (mut session, mut rx) = open_session(backend.clone());

        // Act
        session.next(&clock).unwrap();
        let resolution = rx.recv().await.unwrap();
        session.resolve(&resolution, &clock);

        // Assert
        assert_eq!(backend.last_loaded().as_deref(), Some("music/track2.mp3"));
        assert_eq!(session.player().current_track_index(), 1);
        assert_eq!(session.player().status(), PlaybackStatus::Playing);
    }

    #[tokio::test]
    async fn test_superseded_failure_does_not_touch_new_track() {
        // Arrange
        let clock = FixedClock(test_epoch());
        let backend = Arc::new(RecordingAudioBackend::with_play_results(vec![
            Err(PlaybackError::LoadFailure("missing".to_owned())),
            Ok(()),
        ]));
        let (mut session, mut rx) = open_session(backend.clone());

        // Act
        session.next(&clock).unwrap();
        session.next(&clock).unwrap();
        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        let first_applied = session.resolve(&first, &clock);
        let second_applied = session.resolve(&second, &clock);

        // Assert
        assert!(!first_applied);
        assert!(second_applied);
        assert_eq!(session.player().current_track_index(), 2);
        assert_eq!(session.player().status(), PlaybackStatus::Playing);
        assert_eq!(session.player().last_error(), None);
    }

    #[tokio::test]
    async fn test_seek_instructs_backend_with_clamped_position() {
        let clock = FixedClock(test_epoch());
        let backend = Arc::new(RecordingAudioBackend::new());
        let (mut session, _rx) = open_session(backend.clone());
        session
            .on_backend_event(BackendEvent::MetadataLoaded(120.0), &clock)
            .unwrap();

        let position = session.seek(300.0, &clock);

        assert!((position - 120.0).abs() < f64::EPSILON);
        assert_eq!(backend.calls().last(), Some(&AudioCall::SetPosition(120.0)));
    }

    #[tokio::test]
    async fn test_ended_on_last_track_wraps_and_plays() {
        // Arrange
        let clock = FixedClock(test_epoch());
        let backend = Arc::new(RecordingAudioBackend::new());
        let (mut session, mut rx) = open_session(backend.clone());
        session.select_track(2, &clock).unwrap();
        let resolution = rx.recv().await.unwrap();
        session.resolve(&resolution, &clock);

        // Act
        session.on_backend_event(BackendEvent::Ended, &clock).unwrap();
        let resolution = rx.recv().await.unwrap();
        session.resolve(&resolution, &clock);

        // Assert
        assert_eq!(session.player().current_track_index(), 0);
        assert_eq!(session.player().status(), PlaybackStatus::Playing);
        assert_eq!(backend.last_loaded().as_deref(), Some("music/track1.mp3"));
    }

    #[tokio::test]
    async fn test_close_stops_audio_once_and_skips_pending_play() {
        // Arrange
        let clock = FixedClock(test_epoch());
        let backend = Arc::new(RecordingAudioBackend::new());
        let (mut session, mut rx) = open_session(backend.clone());
        session.toggle_play_pause(&clock);

        // Act
        let events = session.close(&clock);

        // Assert
        assert_eq!(backend.stop_count(), 1);
        assert!(events.iter().any(|e| e.metadata.event_type == "player.stopped"));
        assert!(rx.recv().await.is_none());
        assert!(!backend.calls().contains(&AudioCall::Play));
    }

    #[tokio::test]
    async fn test_drop_stops_audio() {
        let backend = Arc::new(RecordingAudioBackend::new());
        let (session, _rx) = open_session(backend.clone());

        drop(session);

        assert_eq!(backend.stop_count(), 1);
    }

    #[tokio::test]
    async fn test_play_answered_after_close_leaves_no_audio() {
        // Arrange
        let clock = FixedClock(test_epoch());
        let backend = Arc::new(GatedAudioBackend::new());
        let (mut session, mut rx) = open_session(backend.clone());
        session.toggle_play_pause(&clock);
        tokio::task::yield_now().await;

        // Act
        session.close(&clock);
        backend.open_gate();
        let _ = rx.recv().await;

        // Assert
        assert!(!backend.is_playing());
        assert_eq!(backend.stop_count(), 2);
    }
}
