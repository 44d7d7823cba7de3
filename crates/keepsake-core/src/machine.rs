//! State machine abstraction.
//!
//! Machines decide on a command, record the resulting event, and mutate their
//! state only through [`StateMachine::apply`]. Recorded events stay in an
//! uncommitted buffer until the host drains them for logging or rendering.

use uuid::Uuid;

use crate::event::DomainEvent;

/// Trait for state machines whose transitions are driven by domain events.
pub trait StateMachine: Send {
    /// The event type this machine produces and consumes.
    type Event: DomainEvent;

    /// Returns the machine identifier.
    fn machine_id(&self) -> Uuid;

    /// Returns the current version (number of events applied).
    fn version(&self) -> i64;

    /// Apply an event to mutate internal state.
    fn apply(&mut self, event: &Self::Event);

    /// Returns events recorded since the last drain.
    fn uncommitted_events(&self) -> &[Self::Event];

    /// Removes and returns the recorded events.
    fn take_uncommitted_events(&mut self) -> Vec<Self::Event>;
}
