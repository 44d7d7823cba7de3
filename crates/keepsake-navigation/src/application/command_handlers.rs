//! Command handlers for scene navigation.
//!
//! The host's navigation chrome goes through these handlers, which only act
//! on controls the current scene actually offers. Scene content calls the
//! controller directly.

use keepsake_core::clock::Clock;
use keepsake_core::command::Command;
use tracing::{debug, info};

use crate::domain::commands::{Advance, Retreat};
use crate::domain::controller::SceneController;

/// Handles the `Advance` command from navigation chrome. Returns whether the
/// cursor moved.
pub fn handle_advance<I>(
    command: &Advance,
    controller: &mut SceneController<I>,
    clock: &dyn Clock,
) -> bool {
    if !controller.controls().next {
        debug!(
            command = command.command_type(),
            scene = controller.current_key(),
            "forward control not offered"
        );
        return false;
    }
    let moved = controller.advance(clock);
    info!(
        command = command.command_type(),
        moved,
        cursor = controller.current(),
        "handled advance command"
    );
    moved
}

/// Handles the `Retreat` command from navigation chrome. Returns whether the
/// cursor moved.
pub fn handle_retreat<I>(
    command: &Retreat,
    controller: &mut SceneController<I>,
    clock: &dyn Clock,
) -> bool {
    if !controller.controls().back {
        debug!(
            command = command.command_type(),
            scene = controller.current_key(),
            "back control not offered"
        );
        return false;
    }
    let moved = controller.retreat(clock);
    info!(
        command = command.command_type(),
        moved,
        cursor = controller.current(),
        "handled retreat command"
    );
    moved
}
