//! Logging of drained domain events.

use keepsake_core::event::DomainEvent;
use tracing::info;

/// Logs each event with its type, sequence number and JSON payload.
pub fn log_events<E: DomainEvent>(events: &[E]) {
    for event in events {
        let metadata = event.metadata();
        info!(
            event_type = event.event_type(),
            machine_id = %metadata.machine_id,
            sequence = metadata.sequence_number,
            payload = %event.to_payload(),
            "domain event"
        );
    }
}
