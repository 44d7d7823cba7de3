//! The playlist page: hosts the only media player.
//!
//! A [`PlayerSession`] exists only while this scene is mounted. Exit closes
//! it, which stops audio and invalidates every outstanding play ticket;
//! re-entering opens a new session with a new id.

use std::sync::Arc;

use keepsake_content::domain::manifest::PlaylistContent;
use keepsake_core::audio::AudioBackend;
use keepsake_core::clock::Clock;
use keepsake_navigation::domain::scene::{NavigationRequest, Scene, SceneContext};
use keepsake_player::application::command_handlers::handle_player_command;
use keepsake_player::application::query_handlers::get_player_view;
use keepsake_player::application::session::PlayerSession;
use keepsake_player::domain::playlist::Playlist;
use keepsake_player::domain::ticket::PlayResolution;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use super::chrome::page;
use super::input::SceneInput;
use super::journal::log_events;

/// Width of the text progress bar.
const PROGRESS_WIDTH: usize = 24;

/// Song list with an embedded player.
pub struct PlaylistScene {
    title: String,
    playlist: Playlist,
    backend: Arc<dyn AudioBackend>,
    resolutions: UnboundedSender<PlayResolution>,
    session: Option<PlayerSession>,
    notice: Option<String>,
}

impl PlaylistScene {
    /// Creates the playlist page. Play resolutions are delivered to
    /// `resolutions` and must be routed back as [`SceneInput::PlayResolved`].
    #[must_use]
    pub fn new(
        content: &PlaylistContent,
        playlist: Playlist,
        backend: Arc<dyn AudioBackend>,
        resolutions: UnboundedSender<PlayResolution>,
    ) -> Self {
        Self {
            title: content.title.clone(),
            playlist,
            backend,
            resolutions,
            session: None,
            notice: None,
        }
    }

    /// The mounted session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&PlayerSession> {
        self.session.as_ref()
    }

    fn drain(&mut self) {
        if let Some(session) = self.session.as_mut() {
            log_events(&session.take_events());
        }
    }
}

impl Scene<SceneInput> for PlaylistScene {
    fn key(&self) -> &'static str {
        "playlist"
    }

    fn enter(&mut self, _clock: &dyn Clock) {
        self.notice = None;
        self.session = Some(PlayerSession::open(
            self.playlist.clone(),
            Arc::clone(&self.backend),
            self.resolutions.clone(),
        ));
    }

    fn exit(&mut self, clock: &dyn Clock) {
        if let Some(session) = self.session.take() {
            log_events(&session.close(clock));
        }
    }

    fn handle(&mut self, input: &SceneInput, clock: &dyn Clock) -> Option<NavigationRequest> {
        let session = self.session.as_mut()?;
        let result = match input {
            SceneInput::Player(command) => handle_player_command(command, session, clock),
            SceneInput::PlayResolved(resolution) => {
                if !session.resolve(resolution, clock) {
                    debug!(
                        ticket_session = %resolution.ticket.session_id,
                        ticket_generation = %resolution.ticket.generation,
                        "discarded stale play resolution"
                    );
                }
                Ok(())
            }
            SceneInput::Backend(event) => session.on_backend_event(*event, clock),
            SceneInput::FillCell(_) | SceneInput::Photo(_) => return None,
        };
        match result {
            Ok(()) => self.notice = None,
            Err(error) => {
                warn!(%error, "player input rejected");
                self.notice = Some(error.to_string());
            }
        }
        self.drain();
        None
    }

    fn render(&self, context: &SceneContext) -> String {
        let mut body = vec![self.title.clone(), String::new()];
        if let Some(session) = &self.session {
            let view = get_player_view(session.player());
            body.push(view.status_label.to_owned());
            body.push(format!("[cover: {}]", view.cover_image));
            body.push(view.title.clone());
            body.push(format!(
                "{} {} / {}",
                progress_bar(view.progress),
                view.position,
                view.duration
            ));
            if let Some(error) = &view.last_error {
                body.push(error.clone());
            }
            body.push(String::new());
            for row in &view.tracks {
                let marker = if row.current { "▶" } else { " " };
                body.push(format!("{marker} {}. {}", row.index, row.title));
            }
            body.push(String::new());
            body.push("play | skip | prev | track <n> | seek <secs>".to_owned());
        }
        if let Some(notice) = &self.notice {
            body.push(notice.clone());
        }
        page("Playlist", &body, context)
    }
}

impl std::fmt::Debug for PlaylistScene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaylistScene")
            .field("title", &self.title)
            .field("playlist", &self.playlist)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn progress_bar(progress: f64) -> String {
    let filled = ((progress.clamp(0.0, 1.0) * PROGRESS_WIDTH as f64).round() as usize)
        .min(PROGRESS_WIDTH);
    format!(
        "[{}{}]",
        "=".repeat(filled),
        "-".repeat(PROGRESS_WIDTH - filled)
    )
}
