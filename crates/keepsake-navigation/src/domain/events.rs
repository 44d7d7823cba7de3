//! Domain events for scene navigation.

use keepsake_core::event::{DomainEvent, EventMetadata};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event type recorded when a scene is mounted.
pub const SCENE_ENTERED_EVENT_TYPE: &str = "navigation.scene_entered";
/// Event type recorded when a scene is unmounted.
pub const SCENE_EXITED_EVENT_TYPE: &str = "navigation.scene_exited";
/// Event type recorded when a transition begins.
pub const TRANSITION_STARTED_EVENT_TYPE: &str = "navigation.transition_started";
/// Event type recorded when a transition has played out.
pub const TRANSITION_COMPLETED_EVENT_TYPE: &str = "navigation.transition_completed";

/// Emitted when a scene becomes the current scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneEntered {
    /// Cursor position of the scene.
    pub index: usize,
    /// Stable scene key.
    pub key: String,
}

/// Emitted when the current scene is unmounted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneExited {
    /// Cursor position of the scene.
    pub index: usize,
    /// Stable scene key.
    pub key: String,
}

/// Emitted when the fade/slide transition starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionStarted {
    /// Outgoing scene, `None` for the initial entrance.
    pub from: Option<usize>,
    /// Incoming scene.
    pub to: usize,
}

/// Emitted once the transition duration has elapsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionCompleted {
    /// The scene that finished entering.
    pub index: usize,
}

/// Event payload variants for scene navigation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum NavigationEventKind {
    /// A scene was mounted.
    SceneEntered(SceneEntered),
    /// A scene was unmounted.
    SceneExited(SceneExited),
    /// A transition started.
    TransitionStarted(TransitionStarted),
    /// A transition completed.
    TransitionCompleted(TransitionCompleted),
}

impl NavigationEventKind {
    /// Returns the event type name for this payload.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::SceneEntered(_) => SCENE_ENTERED_EVENT_TYPE,
            Self::SceneExited(_) => SCENE_EXITED_EVENT_TYPE,
            Self::TransitionStarted(_) => TRANSITION_STARTED_EVENT_TYPE,
            Self::TransitionCompleted(_) => TRANSITION_COMPLETED_EVENT_TYPE,
        }
    }
}

/// Domain event envelope for scene navigation.
#[derive(Debug, Clone)]
pub struct NavigationEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: NavigationEventKind,
}

impl DomainEvent for NavigationEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("NavigationEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}

impl NavigationEvent {
    /// Builds an event envelope for `kind`.
    #[must_use]
    pub fn new(
        kind: NavigationEventKind,
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
