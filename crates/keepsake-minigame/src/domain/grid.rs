//! The heart grid state machine.

use chrono::{DateTime, TimeDelta, Utc};
use keepsake_core::clock::Clock;
use keepsake_core::error::DomainError;
use keepsake_core::machine::StateMachine;
use tracing::debug;
use uuid::Uuid;

use super::events::{
    AutoAdvanceRequested, CellFilled, GameWon, MinigameEvent, MinigameEventKind,
};
use super::layout::{Cell, GRID_CELLS, GridLayout, count};

/// Delay between winning and the automatic advance, in milliseconds.
pub const AUTO_ADVANCE_DELAY_MS: i64 = 2_500;

/// Game phase state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Cells can still be filled.
    Playing,
    /// The target was reached; the advance is pending.
    Won {
        /// When the target was reached.
        at: DateTime<Utc>,
    },
    /// The advance has been requested. Terminal.
    Advanced,
}

/// Result of a fill attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillOutcome {
    /// The cell received a heart; the game continues.
    Filled,
    /// The cell received a heart and the target was reached.
    Won,
    /// The cell was not empty or the game is over; nothing changed.
    Ignored,
}

/// The aggregate for one play-through of the grid.
///
/// Cells only move from `Empty` to `Filled`, so the heart count never
/// decreases and the win is recorded at most once.
#[derive(Debug)]
pub struct HeartGrid {
    /// Machine identifier.
    pub id: Uuid,
    /// Current version (event count).
    pub(crate) version: i64,
    /// Current cells, row-major.
    pub(crate) cells: [Cell; GRID_CELLS],
    /// Hearts needed to win.
    pub(crate) target: usize,
    /// Current phase.
    pub(crate) phase: GamePhase,
    /// Events recorded since the last drain.
    uncommitted_events: Vec<MinigameEvent>,
}

impl HeartGrid {
    /// Starts a fresh game from `layout`.
    #[must_use]
    pub fn new(layout: &GridLayout) -> Self {
        Self {
            id: Uuid::new_v4(),
            version: 0,
            cells: layout.cells(),
            target: layout.target(),
            phase: GamePhase::Playing,
            uncommitted_events: Vec::new(),
        }
    }

    /// Current cells, row-major.
    #[must_use]
    pub fn cells(&self) -> &[Cell; GRID_CELLS] {
        &self.cells
    }

    /// Hearts currently on the grid.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        count(&self.cells, Cell::Filled)
    }

    /// Hearts needed to win.
    #[must_use]
    pub fn target(&self) -> usize {
        self.target
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Whether the target has been reached.
    #[must_use]
    pub fn is_won(&self) -> bool {
        !matches!(self.phase, GamePhase::Playing)
    }

    /// Fills the cell at `index`, producing `CellFilled` and, on reaching the
    /// target, `GameWon`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `index` is outside the grid.
    pub fn fill(&mut self, index: usize, clock: &dyn Clock) -> Result<FillOutcome, DomainError> {
        if index >= GRID_CELLS {
            return Err(DomainError::Validation(format!(
                "cell {index} is outside the {GRID_CELLS}-cell grid"
            )));
        }
        if self.is_won() || self.cells[index] != Cell::Empty {
            debug!(index, cell = ?self.cells[index], phase = ?self.phase, "fill ignored");
            return Ok(FillOutcome::Ignored);
        }

        let filled_count = self.filled_count() + 1;
        self.record(
            MinigameEventKind::CellFilled(CellFilled {
                index,
                filled_count,
            }),
            clock,
        );

        if filled_count >= self.target {
            self.record(MinigameEventKind::GameWon(GameWon { filled_count }), clock);
            return Ok(FillOutcome::Won);
        }
        Ok(FillOutcome::Filled)
    }

    /// Returns `true` exactly once, on the first call at least
    /// [`AUTO_ADVANCE_DELAY_MS`] after the win.
    pub fn poll_auto_advance(&mut self, clock: &dyn Clock) -> bool {
        let GamePhase::Won { at } = self.phase else {
            return false;
        };
        if clock.now() - at < TimeDelta::milliseconds(AUTO_ADVANCE_DELAY_MS) {
            return false;
        }
        self.record(
            MinigameEventKind::AutoAdvanceRequested(AutoAdvanceRequested { won_at: at }),
            clock,
        );
        true
    }

    fn record(&mut self, kind: MinigameEventKind, clock: &dyn Clock) {
        let event = MinigameEvent::new(kind, self.id, self.version + 1, clock.now());
        self.apply(&event);
        self.uncommitted_events.push(event);
    }
}

impl StateMachine for HeartGrid {
    type Event = MinigameEvent;

    fn machine_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match &event.kind {
            MinigameEventKind::CellFilled(payload) => {
                self.cells[payload.index] = Cell::Filled;
            }
            MinigameEventKind::GameWon(_) => {
                self.phase = GamePhase::Won {
                    at: event.metadata.occurred_at,
                };
            }
            MinigameEventKind::AutoAdvanceRequested(_) => {
                self.phase = GamePhase::Advanced;
            }
        }
        self.version += 1;
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn take_uncommitted_events(&mut self) -> Vec<Self::Event> {
        std::mem::take(&mut self.uncommitted_events)
    }
}
