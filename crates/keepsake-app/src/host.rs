//! The presentation host: owns the scene controller and routes commands,
//! play resolutions and ticks to it.

use std::sync::Arc;
use std::time::Duration;

use keepsake_content::domain::manifest::Manifest;
use keepsake_core::audio::BackendEvent;
use keepsake_core::clock::Clock;
use keepsake_core::machine::StateMachine;
use keepsake_navigation::application::command_handlers::{handle_advance, handle_retreat};
use keepsake_navigation::application::query_handlers::get_navigation_view;
use keepsake_navigation::domain::commands::{Advance, Retreat};
use keepsake_navigation::domain::controller::SceneController;
use keepsake_player::domain::ticket::PlayResolution;
use keepsake_scenes::application::deck::build_deck;
use keepsake_scenes::domain::input::SceneInput;
use keepsake_scenes::domain::journal::log_events;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, instrument};

use crate::audio::SimulatedAudioBackend;
use crate::command::{HELP, HostCommand};
use crate::error::AppError;

/// What the host loop should do after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Keep running; redraw if `redraw` is set.
    Continue {
        /// Whether the screen is stale.
        redraw: bool,
    },
    /// Print the command list and keep running.
    Help,
    /// Stop the loop.
    Quit,
}

/// Owns the scene controller and the simulated audio output.
pub struct Host {
    controller: SceneController<SceneInput>,
    backend: Arc<SimulatedAudioBackend>,
    clock: Arc<dyn Clock>,
    was_transitioning: bool,
}

impl Host {
    /// Builds the deck from `manifest` and mounts the first scene.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Content` if the manifest cannot be turned into
    /// scenes.
    pub fn new(
        manifest: &Manifest,
        backend: Arc<SimulatedAudioBackend>,
        resolutions: UnboundedSender<PlayResolution>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AppError> {
        let deck = build_deck(manifest, backend.clone(), resolutions)?;
        let controller = SceneController::new(deck, clock.as_ref())?;
        let mut host = Self {
            controller,
            backend,
            clock,
            was_transitioning: true,
        };
        host.drain();
        Ok(host)
    }

    /// Key of the current scene.
    #[must_use]
    pub fn current_key(&self) -> &'static str {
        self.controller.current_key()
    }

    /// Cursor of the current scene.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.controller.current()
    }

    /// Applies one parsed command line.
    #[instrument(skip(self), fields(scene = self.controller.current_key()))]
    pub fn execute(&mut self, command: &HostCommand) -> Step {
        let clock = self.clock.as_ref();
        let step = match command {
            HostCommand::Next => Step::Continue {
                redraw: handle_advance(&Advance, &mut self.controller, clock),
            },
            HostCommand::Back => Step::Continue {
                redraw: handle_retreat(&Retreat, &mut self.controller, clock),
            },
            HostCommand::Scene(input) => {
                self.controller.dispatch(input, clock);
                Step::Continue { redraw: true }
            }
            HostCommand::Show => Step::Continue { redraw: true },
            HostCommand::Help => Step::Help,
            HostCommand::Quit => {
                self.shutdown();
                Step::Quit
            }
        };
        self.drain();
        step
    }

    /// Routes the answer to an earlier play request to the current scene.
    pub fn resolve(&mut self, resolution: PlayResolution) {
        self.controller
            .dispatch(&SceneInput::PlayResolved(resolution), self.clock.as_ref());
        self.drain();
    }

    /// Advances simulated audio by `elapsed`, forwards its notifications and
    /// lets scenes observe time. Returns whether the screen is stale.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        let clock = self.clock.as_ref();
        let mut redraw = false;
        for event in self.backend.advance(elapsed) {
            redraw |= !matches!(event, BackendEvent::PositionChanged(_));
            self.controller.dispatch(&SceneInput::Backend(event), clock);
        }
        redraw |= self.controller.tick(clock);

        let transitioning = self.controller.is_transitioning(clock);
        redraw |= self.was_transitioning && !transitioning;
        self.was_transitioning = transitioning;

        self.drain();
        redraw
    }

    /// Renders the current scene.
    #[must_use]
    pub fn render(&self) -> String {
        self.controller.render(self.clock.as_ref())
    }

    /// Unmounts the current scene, stopping any audio. Idempotent.
    pub fn shutdown(&mut self) {
        self.controller.shutdown(self.clock.as_ref());
        self.drain();
    }

    /// Text shown for [`Step::Help`].
    #[must_use]
    pub fn help() -> &'static str {
        HELP
    }

    fn drain(&mut self) {
        self.was_transitioning |= self.controller.is_transitioning(self.clock.as_ref());
        let events = self.controller.take_uncommitted_events();
        if events.is_empty() {
            return;
        }
        log_events(&events);
        let view = get_navigation_view(&self.controller, self.clock.as_ref());
        info!(
            cursor = view.cursor,
            scene = view.scene_key,
            back = view.controls.back,
            next = view.controls.next,
            version = view.version,
            "navigation state"
        );
    }
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host")
            .field("controller", &self.controller)
            .field("backend", &self.backend)
            .finish_non_exhaustive()
    }
}
