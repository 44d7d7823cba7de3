//! Commands for the mini-game.

use keepsake_core::command::Command;

/// Command to fill one grid cell (a click on the cell).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillCell {
    /// Row-major cell index, `0..9`.
    pub index: usize,
}

impl Command for FillCell {
    fn command_type(&self) -> &'static str {
        "minigame.fill_cell"
    }
}
