//! The media player state machine.

use keepsake_core::clock::Clock;
use keepsake_core::error::DomainError;
use keepsake_core::generation::{Generation, GenerationCounter};
use keepsake_core::machine::StateMachine;
use tracing::debug;
use uuid::Uuid;

use super::events::{
    PlayRequested, PlaybackFailed, PlaybackPaused, PlaybackStarted, PlayerEvent, PlayerEventKind,
    PlayerStopped, Seeked, TrackSelected,
};
use super::playlist::{Playlist, Track};
use super::status::PlaybackStatus;
use super::ticket::{PlayOrigin, PlayResolution, PlayTicket};

/// Result of a play/pause toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Playback was paused; the playhead is retained.
    Paused,
    /// A play request was issued and awaits resolution.
    PlayRequested(PlayTicket),
    /// A request is already in flight or the player is released.
    Ignored,
}

/// Playback state for one mounted playlist scene.
///
/// Every play request carries the generation current at issue time. Track
/// changes and release move the generation forward, so answers to
/// superseded requests no longer match and are dropped by [`resolve`].
///
/// [`resolve`]: MediaPlayer::resolve
#[derive(Debug)]
pub struct MediaPlayer {
    /// Session identifier; tickets from other sessions are ignored.
    pub id: Uuid,
    /// Current version (event count).
    pub(crate) version: i64,
    /// The fixed track list.
    pub(crate) playlist: Playlist,
    /// Index of the current track.
    pub(crate) current_track_index: usize,
    /// Current status.
    pub(crate) status: PlaybackStatus,
    /// Latest known playhead, in seconds.
    pub(crate) position_seconds: f64,
    /// Latest known duration, in seconds; 0 until metadata loads.
    pub(crate) duration_seconds: f64,
    /// Message from the last failed play request.
    pub(crate) last_error: Option<String>,
    /// Tags play requests so superseded answers can be discarded.
    pub(crate) generations: GenerationCounter,
    /// Set once by [`MediaPlayer::release`].
    pub(crate) released: bool,
    /// Events recorded since the last drain.
    uncommitted_events: Vec<PlayerEvent>,
}

impl MediaPlayer {
    /// Opens a player on the first track, stopped.
    #[must_use]
    pub fn open(playlist: Playlist) -> Self {
        Self {
            id: Uuid::new_v4(),
            version: 0,
            playlist,
            current_track_index: 0,
            status: PlaybackStatus::Stopped,
            position_seconds: 0.0,
            duration_seconds: 0.0,
            last_error: None,
            generations: GenerationCounter::new(),
            released: false,
            uncommitted_events: Vec::new(),
        }
    }

    /// The track list.
    #[must_use]
    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    /// Index of the current track.
    #[must_use]
    pub fn current_track_index(&self) -> usize {
        self.current_track_index
    }

    /// The current track.
    #[must_use]
    pub fn current_track(&self) -> &Track {
        &self.playlist.tracks()[self.current_track_index]
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    /// Whether a play request is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status == PlaybackStatus::Loading
    }

    /// Latest known playhead, in seconds.
    #[must_use]
    pub fn position_seconds(&self) -> f64 {
        self.position_seconds
    }

    /// Latest known duration, in seconds.
    #[must_use]
    pub fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }

    /// Playhead as a fraction of the duration, in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration_seconds > 0.0 {
            (self.position_seconds / self.duration_seconds).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Message from the last failed play request, cleared on the next request.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Generation of the most recent request or release.
    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generations.current()
    }

    /// Whether the player has been released.
    #[must_use]
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Makes the track at `index` current and requests playback.
    ///
    /// Position and duration reset to 0 and status becomes `Loading`. The
    /// returned ticket must be resolved through [`MediaPlayer::resolve`].
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `index` is outside the playlist
    /// or the player was released.
    pub fn select_track(
        &mut self,
        index: usize,
        clock: &dyn Clock,
    ) -> Result<PlayTicket, DomainError> {
        if self.released {
            return Err(DomainError::Validation("player is released".to_owned()));
        }
        let Some(track) = self.playlist.get(index) else {
            return Err(DomainError::Validation(format!(
                "track {index} is outside the {}-track playlist",
                self.playlist.len()
            )));
        };

        let generation = self.generations.peek_next();
        let selected = TrackSelected {
            track_index: index,
            track_id: track.id,
            audio_source: track.audio_source.clone(),
            generation,
        };
        self.record(PlayerEventKind::TrackSelected(selected), clock);
        Ok(self.request_play(PlayOrigin::TrackChange, generation, clock))
    }

    /// Selects the following track, wrapping to the first.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the player was released.
    pub fn next(&mut self, clock: &dyn Clock) -> Result<PlayTicket, DomainError> {
        let index = self.playlist.next_index(self.current_track_index);
        self.select_track(index, clock)
    }

    /// Selects the preceding track, wrapping to the last.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the player was released.
    pub fn previous(&mut self, clock: &dyn Clock) -> Result<PlayTicket, DomainError> {
        let index = self.playlist.previous_index(self.current_track_index);
        self.select_track(index, clock)
    }

    /// Handles the backend's end-of-track signal. Same as [`MediaPlayer::next`].
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the player was released.
    pub fn on_track_ended(&mut self, clock: &dyn Clock) -> Result<PlayTicket, DomainError> {
        self.next(clock)
    }

    /// Pauses when playing, otherwise requests playback.
    ///
    /// Ignored while a request is in flight.
    pub fn toggle_play_pause(&mut self, clock: &dyn Clock) -> ToggleOutcome {
        if self.released {
            return ToggleOutcome::Ignored;
        }
        match self.status {
            PlaybackStatus::Playing => {
                self.record(
                    PlayerEventKind::PlaybackPaused(PlaybackPaused {
                        position_seconds: self.position_seconds,
                    }),
                    clock,
                );
                ToggleOutcome::Paused
            }
            PlaybackStatus::Loading => {
                debug!(generation = %self.generation(), "toggle ignored while loading");
                ToggleOutcome::Ignored
            }
            PlaybackStatus::Stopped | PlaybackStatus::Paused | PlaybackStatus::Errored => {
                let generation = self.generations.peek_next();
                let ticket = self.request_play(PlayOrigin::Resume, generation, clock);
                ToggleOutcome::PlayRequested(ticket)
            }
        }
    }

    /// Moves the playhead to `target_seconds` clamped to `[0, duration]` and
    /// returns the clamped value. Status is unchanged.
    pub fn seek(&mut self, target_seconds: f64, clock: &dyn Clock) -> f64 {
        let upper = self.duration_seconds.max(0.0);
        let position = if target_seconds.is_nan() {
            0.0
        } else {
            target_seconds.clamp(0.0, upper)
        };
        if self.released {
            return position;
        }
        self.record(
            PlayerEventKind::Seeked(Seeked {
                requested_seconds: target_seconds,
                position_seconds: position,
            }),
            clock,
        );
        position
    }

    /// Stores the backend's latest playhead.
    pub fn on_position_changed(&mut self, seconds: f64) {
        if !self.released {
            self.position_seconds = non_negative(seconds);
        }
    }

    /// Stores the duration reported when track metadata loads.
    pub fn on_metadata_loaded(&mut self, duration_seconds: f64) {
        if !self.released {
            self.duration_seconds = non_negative(duration_seconds);
        }
    }

    /// Applies the backend's answer to a play request.
    ///
    /// Returns `false` without touching state when the ticket belongs to
    /// another session, has been superseded, or no request is in flight.
    pub fn resolve(&mut self, resolution: &PlayResolution, clock: &dyn Clock) -> bool {
        let ticket = resolution.ticket;
        if ticket.session_id != self.id
            || !self.generations.is_current(ticket.generation)
            || self.status != PlaybackStatus::Loading
        {
            debug!(
                ticket_generation = %ticket.generation,
                current_generation = %self.generation(),
                status = ?self.status,
                "stale play resolution ignored"
            );
            return false;
        }

        let kind = match &resolution.result {
            Ok(()) => PlayerEventKind::PlaybackStarted(PlaybackStarted {
                generation: ticket.generation,
            }),
            Err(error) => PlayerEventKind::PlaybackFailed(PlaybackFailed {
                generation: ticket.generation,
                error: error.clone(),
                message: ticket.origin.failure_message().to_owned(),
            }),
        };
        self.record(kind, clock);
        true
    }

    /// Invalidates every outstanding ticket and stops the player.
    ///
    /// Returns `false` if already released.
    pub fn release(&mut self, clock: &dyn Clock) -> bool {
        if self.released {
            return false;
        }
        let generation = self.generations.peek_next();
        self.record(
            PlayerEventKind::PlayerStopped(PlayerStopped { generation }),
            clock,
        );
        true
    }

    fn request_play(
        &mut self,
        origin: PlayOrigin,
        generation: Generation,
        clock: &dyn Clock,
    ) -> PlayTicket {
        self.record(
            PlayerEventKind::PlayRequested(PlayRequested {
                track_index: self.current_track_index,
                generation,
                origin,
            }),
            clock,
        );
        PlayTicket {
            session_id: self.id,
            generation,
            track_index: self.current_track_index,
            origin,
        }
    }

    fn record(&mut self, kind: PlayerEventKind, clock: &dyn Clock) {
        let event = PlayerEvent::new(kind, self.id, self.version + 1, clock.now());
        self.apply(&event);
        self.uncommitted_events.push(event);
    }
}

fn non_negative(seconds: f64) -> f64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    }
}

impl StateMachine for MediaPlayer {
    type Event = PlayerEvent;

    fn machine_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match &event.kind {
            PlayerEventKind::TrackSelected(payload) => {
                self.generations.advance_to(payload.generation);
                self.current_track_index = payload.track_index;
                self.position_seconds = 0.0;
                self.duration_seconds = 0.0;
            }
            PlayerEventKind::PlayRequested(payload) => {
                self.generations.advance_to(payload.generation);
                self.status = PlaybackStatus::Loading;
                self.last_error = None;
            }
            PlayerEventKind::PlaybackStarted(_) => {
                self.status = PlaybackStatus::Playing;
            }
            PlayerEventKind::PlaybackFailed(payload) => {
                self.status = PlaybackStatus::Errored;
                self.last_error = Some(payload.message.clone());
            }
            PlayerEventKind::PlaybackPaused(payload) => {
                self.status = PlaybackStatus::Paused;
                self.position_seconds = payload.position_seconds;
            }
            PlayerEventKind::Seeked(payload) => {
                self.position_seconds = payload.position_seconds;
            }
            PlayerEventKind::PlayerStopped(payload) => {
                self.generations.advance_to(payload.generation);
                self.status = PlaybackStatus::Stopped;
                self.released = true;
            }
        }
        self.version += 1;
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn take_uncommitted_events(&mut self) -> Vec<Self::Event> {
        std::mem::take(&mut self.uncommitted_events)
    }
}
