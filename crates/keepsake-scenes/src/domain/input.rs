//! Host input routed to the current scene.

use keepsake_core::audio::BackendEvent;
use keepsake_minigame::domain::commands::FillCell;
use keepsake_player::domain::commands::PlayerCommand;
use keepsake_player::domain::ticket::PlayResolution;

/// Direction of a gallery step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoStep {
    /// Show the next photo, wrapping after the last.
    Next,
    /// Show the previous photo, wrapping before the first.
    Previous,
}

/// Everything the host can send to a scene. Scenes ignore inputs that are
/// not meant for them.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneInput {
    /// A click on a mini-game cell.
    FillCell(FillCell),
    /// A media player control.
    Player(PlayerCommand),
    /// A gallery arrow.
    Photo(PhotoStep),
    /// The answer to an earlier play request.
    PlayResolved(PlayResolution),
    /// A notification from the audio backend.
    Backend(BackendEvent),
}
