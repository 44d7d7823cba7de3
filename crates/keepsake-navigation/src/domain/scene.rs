//! Scene lifecycle contract.
//!
//! A scene is mounted by [`crate::domain::controller::SceneController`] via
//! [`Scene::enter`] and unmounted via [`Scene::exit`]. Only the current scene
//! is mounted; anything a scene acquires in `enter` must be released in
//! `exit` before it returns.

use keepsake_core::clock::Clock;
use serde::Serialize;

use super::transition::TransitionFrame;

/// A navigation request raised by scene content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NavigationRequest {
    /// Move to the next scene.
    Advance,
    /// Move to the previous scene.
    Retreat,
}

/// Which navigation controls the host should render for a scene.
///
/// An absent control means the corresponding direction is not offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct NavigationControls {
    /// Whether a "back" control is shown.
    pub back: bool,
    /// Whether a "next" control is shown.
    pub next: bool,
}

/// Everything a scene needs to render itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SceneContext {
    /// Cursor position of the scene being rendered.
    pub index: usize,
    /// Total number of scenes.
    pub scene_count: usize,
    /// Controls offered for this scene.
    pub controls: NavigationControls,
    /// The transition in flight, if any.
    pub transition: Option<TransitionFrame>,
}

/// One full-screen step of the presentation.
///
/// `I` is the host's input type, routed to the current scene only.
pub trait Scene<I>: Send {
    /// Stable key identifying the scene (used in events and logs).
    fn key(&self) -> &'static str;

    /// Whether the host may offer a manual forward control. Scenes that
    /// advance on their own return `false`.
    fn manual_forward(&self) -> bool {
        true
    }

    /// Mount the scene. Called exactly once per visit.
    fn enter(&mut self, clock: &dyn Clock);

    /// Unmount the scene, releasing everything acquired in `enter`.
    fn exit(&mut self, clock: &dyn Clock);

    /// Handle host input while the scene is current.
    fn handle(&mut self, input: &I, clock: &dyn Clock) -> Option<NavigationRequest>;

    /// Observe the passage of time while the scene is current.
    fn tick(&mut self, _clock: &dyn Clock) -> Option<NavigationRequest> {
        None
    }

    /// Render the scene for display.
    fn render(&self, context: &SceneContext) -> String;
}
