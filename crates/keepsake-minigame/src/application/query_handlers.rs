//! Query handlers for the mini-game.
//!
//! Read-only views rendered by the hosting scene.

use keepsake_core::machine::StateMachine;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::grid::HeartGrid;
use crate::domain::layout::{Cell, GRID_CELLS};

/// Read-only view of a heart grid.
#[derive(Debug, Clone, Serialize)]
pub struct GridView {
    /// The game identifier.
    pub game_id: Uuid,
    /// Cells, row-major.
    pub cells: [Cell; GRID_CELLS],
    /// Hearts on the grid.
    pub filled_count: usize,
    /// Hearts needed to win.
    pub target: usize,
    /// Whether the win overlay should be shown.
    pub won: bool,
    /// Current version (event count).
    pub version: i64,
}

impl GridView {
    /// The grid as three rows of cell symbols.
    #[must_use]
    pub fn rows(&self) -> Vec<String> {
        self.cells
            .chunks(3)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }
}

/// Builds the view of `grid`.
#[must_use]
pub fn get_grid_view(grid: &HeartGrid) -> GridView {
    GridView {
        game_id: grid.machine_id(),
        cells: *grid.cells(),
        filled_count: grid.filled_count(),
        target: grid.target(),
        won: grid.is_won(),
        version: grid.version(),
    }
}
