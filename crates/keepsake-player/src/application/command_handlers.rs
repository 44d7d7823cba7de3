//! Command handlers for the media player.
//!
//! Routes user commands to the mounted player session.

use keepsake_core::clock::Clock;
use keepsake_core::command::Command;
use keepsake_core::error::DomainError;
use tracing::info;

use crate::application::session::PlayerSession;
use crate::domain::commands::PlayerCommand;

/// Handles a `PlayerCommand` against the mounted session.
///
/// # Errors
///
/// Returns `DomainError::Validation` if a selected track is outside the
/// playlist or the session is closed.
pub fn handle_player_command(
    command: &PlayerCommand,
    session: &mut PlayerSession,
    clock: &dyn Clock,
) -> Result<(), DomainError> {
    match *command {
        PlayerCommand::TogglePlayPause => {
            session.toggle_play_pause(clock);
        }
        PlayerCommand::Next => {
            session.next(clock)?;
        }
        PlayerCommand::Previous => {
            session.previous(clock)?;
        }
        PlayerCommand::SelectTrack { index } => {
            session.select_track(index, clock)?;
        }
        PlayerCommand::Seek { seconds } => {
            session.seek(seconds, clock);
        }
    }

    let player = session.player();
    info!(
        command = command.command_type(),
        session_id = %session.id(),
        track = player.current_track_index(),
        status = ?player.status(),
        "handled player command"
    );
    Ok(())
}
