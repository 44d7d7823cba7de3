//! Domain events for the mini-game.

use chrono::{DateTime, Utc};
use keepsake_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event type recorded when a cell is filled.
pub const CELL_FILLED_EVENT_TYPE: &str = "minigame.cell_filled";
/// Event type recorded when the target is reached.
pub const GAME_WON_EVENT_TYPE: &str = "minigame.game_won";
/// Event type recorded when the delayed advance fires.
pub const AUTO_ADVANCE_REQUESTED_EVENT_TYPE: &str = "minigame.auto_advance_requested";

/// Emitted when an empty cell receives a heart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellFilled {
    /// Row-major cell index.
    pub index: usize,
    /// Hearts on the grid after this fill.
    pub filled_count: usize,
}

/// Emitted once when the heart target is reached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameWon {
    /// Hearts on the grid at the win.
    pub filled_count: usize,
}

/// Emitted once when the post-win delay has elapsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoAdvanceRequested {
    /// When the game was won.
    pub won_at: DateTime<Utc>,
}

/// Event payload variants for the mini-game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MinigameEventKind {
    /// A cell was filled.
    CellFilled(CellFilled),
    /// The game was won.
    GameWon(GameWon),
    /// The presentation should advance.
    AutoAdvanceRequested(AutoAdvanceRequested),
}

impl MinigameEventKind {
    /// Returns the event type name for this payload.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::CellFilled(_) => CELL_FILLED_EVENT_TYPE,
            Self::GameWon(_) => GAME_WON_EVENT_TYPE,
            Self::AutoAdvanceRequested(_) => AUTO_ADVANCE_REQUESTED_EVENT_TYPE,
        }
    }
}

/// Domain event envelope for the mini-game.
#[derive(Debug, Clone)]
pub struct MinigameEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: MinigameEventKind,
}

impl MinigameEvent {
    /// Builds an event envelope for `kind`.
    #[must_use]
    pub fn new(
        kind: MinigameEventKind,
        machine_id: Uuid,
        sequence_number: i64,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            metadata: EventMetadata::new(
                kind.event_type(),
                machine_id,
                sequence_number,
                occurred_at,
            ),
            kind,
        }
    }
}

impl DomainEvent for MinigameEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("MinigameEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
