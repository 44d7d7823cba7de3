//! Grid cells and starting layouts.

use keepsake_core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Number of cells in the 3×3 grid.
pub const GRID_CELLS: usize = 9;

/// Hearts needed to win with the reference layout.
pub const DEFAULT_TARGET: usize = 3;

/// The reference layout: hearts in two corners, the centre open, every other
/// cell crossed out.
pub const REFERENCE_PATTERN: &str = "HXX/X.X/XXH";

/// State of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    /// Open for the player to fill.
    Empty,
    /// Holds a heart.
    Filled,
    /// Pre-marked and not interactive.
    Locked,
}

impl Cell {
    fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' | '_' => Some(Self::Empty),
            'H' | 'h' => Some(Self::Filled),
            'X' | 'x' => Some(Self::Locked),
            _ => None,
        }
    }

    /// Single-character symbol used in patterns and text rendering.
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Filled => 'H',
            Self::Locked => 'X',
        }
    }
}

/// A validated starting layout.
///
/// A valid layout can always be won: it starts below the target and has
/// enough empty cells to reach it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    cells: [Cell; GRID_CELLS],
    target: usize,
}

impl GridLayout {
    /// Validates a layout.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Content` if the target is zero or larger than
    /// the grid, if the layout already meets the target, or if the target
    /// cannot be reached with the empty cells available.
    pub fn new(cells: [Cell; GRID_CELLS], target: usize) -> Result<Self, DomainError> {
        if target == 0 || target > GRID_CELLS {
            return Err(DomainError::Content(format!(
                "heart target must be between 1 and {GRID_CELLS}, got {target}"
            )));
        }
        let filled = count(&cells, Cell::Filled);
        let empty = count(&cells, Cell::Empty);
        if filled >= target {
            return Err(DomainError::Content(format!(
                "layout starts with {filled} hearts, target is {target}"
            )));
        }
        if filled + empty < target {
            return Err(DomainError::Content(format!(
                "target {target} unreachable: {filled} hearts and {empty} empty cells"
            )));
        }
        Ok(Self { cells, target })
    }

    /// Parses a compact pattern such as `"HXX/X.X/XXH"`. `H` is a heart, `X`
    /// a locked cell, `.` an empty cell; `/` and whitespace are ignored.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Content` for unknown symbols, a cell count other
    /// than nine, or a layout rejected by [`GridLayout::new`].
    pub fn parse(pattern: &str, target: usize) -> Result<Self, DomainError> {
        let mut cells = Vec::with_capacity(GRID_CELLS);
        for symbol in pattern.chars().filter(|c| !c.is_whitespace() && *c != '/') {
            let cell = Cell::from_symbol(symbol).ok_or_else(|| {
                DomainError::Content(format!("unknown grid symbol '{symbol}'"))
            })?;
            cells.push(cell);
        }
        let cells: [Cell; GRID_CELLS] = cells.try_into().map_err(|cells: Vec<Cell>| {
            DomainError::Content(format!(
                "grid pattern must have {GRID_CELLS} cells, got {}",
                cells.len()
            ))
        })?;
        Self::new(cells, target)
    }

    /// The reference layout with the default target.
    ///
    /// # Panics
    ///
    /// Never; the reference pattern is valid.
    #[must_use]
    pub fn reference() -> Self {
        Self::parse(REFERENCE_PATTERN, DEFAULT_TARGET).expect("reference layout is valid")
    }

    /// The starting cells.
    #[must_use]
    pub fn cells(&self) -> [Cell; GRID_CELLS] {
        self.cells
    }

    /// Hearts needed to win.
    #[must_use]
    pub fn target(&self) -> usize {
        self.target
    }
}

pub(crate) fn count(cells: &[Cell], kind: Cell) -> usize {
    cells.iter().filter(|cell| **cell == kind).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_layout_needs_one_click() {
        let layout = GridLayout::reference();

        assert_eq!(count(&layout.cells(), Cell::Filled), 2);
        assert_eq!(count(&layout.cells(), Cell::Empty), 1);
        assert_eq!(layout.cells()[4], Cell::Empty);
        assert_eq!(layout.target(), 3);
    }

    #[test]
    fn test_parse_rejects_wrong_cell_count() {
        let result = GridLayout::parse("HX./XXH", 3);

        match result {
            Err(DomainError::Content(message)) => assert!(message.contains("got 7")),
            other => panic!("expected Content error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_symbol() {
        let result = GridLayout::parse("HXX/XOX/XXH", 3);

        assert!(matches!(result, Err(DomainError::Content(m)) if m.contains("'O'")));
    }

    #[test]
    fn test_new_rejects_layout_already_won() {
        let result = GridLayout::parse("HHH/.../XXX", 3);

        assert!(matches!(result, Err(DomainError::Content(_))));
    }

    #[test]
    fn test_new_rejects_unreachable_target() {
        let result = GridLayout::parse("HXX/X.X/XXX", 3);

        assert!(matches!(result, Err(DomainError::Content(m)) if m.contains("unreachable")));
    }

    #[test]
    fn test_new_rejects_zero_target() {
        let result = GridLayout::parse(".........", 0);

        assert!(matches!(result, Err(DomainError::Content(_))));
    }
}
