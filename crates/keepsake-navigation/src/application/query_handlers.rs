//! Query handlers for scene navigation.
//!
//! Read-only views the host renders navigation chrome from.

use keepsake_core::clock::Clock;
use keepsake_core::machine::StateMachine;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::controller::SceneController;
use crate::domain::scene::NavigationControls;
use crate::domain::transition::TransitionFrame;

/// Read-only view of the scene controller.
#[derive(Debug, Clone, Serialize)]
pub struct NavigationView {
    /// The controller identifier.
    pub controller_id: Uuid,
    /// Cursor of the current scene.
    pub cursor: usize,
    /// Total number of scenes.
    pub scene_count: usize,
    /// Key of the current scene.
    pub scene_key: &'static str,
    /// Controls offered for the current scene.
    pub controls: NavigationControls,
    /// The transition in flight, if any.
    pub transition: Option<TransitionFrame>,
    /// Current version (event count).
    pub version: i64,
}

/// Builds the navigation view at `clock.now()`.
#[must_use]
pub fn get_navigation_view<I>(controller: &SceneController<I>, clock: &dyn Clock) -> NavigationView {
    NavigationView {
        controller_id: controller.machine_id(),
        cursor: controller.current(),
        scene_count: controller.scene_count(),
        scene_key: controller.current_key(),
        controls: controller.controls(),
        transition: controller.transition_frame(clock),
        version: controller.version(),
    }
}
