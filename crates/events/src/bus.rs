//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the central publish/subscribe hub for [`CrmEvent`]s.
//! It is designed to be shared via `Arc<EventBus>` across the application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use leadflow_core::types::DbId;

// ---------------------------------------------------------------------------
// CrmEvent
// ---------------------------------------------------------------------------

/// A domain event that occurred in the CRM.
///
/// Constructed via [`CrmEvent::new`] and enriched with the builder methods
/// [`with_source`](CrmEvent::with_source), [`with_actor`](CrmEvent::with_actor)
/// and [`with_payload`](CrmEvent::with_payload).
///
/// Event names in use: `lead.created`, `lead.assigned`, `lead.reassigned`,
/// `lead.updated`, `lead.deleted`, `roster.status_changed`,
/// `appointment.batch_created`, `sweep.completed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrmEvent {
    /// Dot-separated event name, e.g. `"lead.assigned"`.
    pub event_type: String,

    /// Optional source entity kind (e.g. `"lead"`, `"sales_person"`).
    pub source_entity_type: Option<String>,

    /// Optional source entity database id.
    pub source_entity_id: Option<DbId>,

    /// Optional id of the account that triggered the event.
    pub actor_id: Option<DbId>,

    /// Free-form JSON payload carrying event-specific data.
    pub payload: serde_json::Value,

    /// When the event was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl CrmEvent {
    /// Create a new event with only the required `event_type`.
    ///
    /// All optional fields default to `None` / empty object.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            source_entity_type: None,
            source_entity_id: None,
            actor_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    /// Attach a source entity to the event.
    pub fn with_source(mut self, entity_type: impl Into<String>, entity_id: DbId) -> Self {
        self.source_entity_type = Some(entity_type.into());
        self.source_entity_id = Some(entity_id);
        self
    }

    /// Attach the acting account to the event.
    pub fn with_actor(mut self, actor_id: DbId) -> Self {
        self.actor_id = Some(actor_id);
        self
    }

    /// Set the JSON payload for the event.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`CrmEvent`].
///
/// # Usage
///
/// ```rust
/// use leadflow_events::bus::{CrmEvent, EventBus};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(CrmEvent::new("lead.created"));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<CrmEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped.
    pub fn publish(&self, event: CrmEvent) {
        // Ignore the SendError, it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<CrmEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        let event = CrmEvent::new("lead.assigned")
            .with_source("lead", 42)
            .with_actor(7)
            .with_payload(serde_json::json!({"assignee": "Alice"}));

        bus.publish(event);

        let received = rx.recv().await.expect("should receive the event");
        assert_eq!(received.event_type, "lead.assigned");
        assert_eq!(received.source_entity_type.as_deref(), Some("lead"));
        assert_eq!(received.source_entity_id, Some(42));
        assert_eq!(received.actor_id, Some(7));
        assert_eq!(received.payload["assignee"], "Alice");
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_event() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(CrmEvent::new("sweep.completed"));

        let e1 = rx1.recv().await.expect("subscriber 1 should receive");
        let e2 = rx2.recv().await.expect("subscriber 2 should receive");

        assert_eq!(e1.event_type, "sweep.completed");
        assert_eq!(e2.event_type, "sweep.completed");
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = EventBus::default();
        // No subscribers; this must not panic.
        bus.publish(CrmEvent::new("lead.deleted"));
    }

    #[test]
    fn default_event_has_empty_optional_fields() {
        let event = CrmEvent::new("lead.created");
        assert_eq!(event.event_type, "lead.created");
        assert!(event.source_entity_type.is_none());
        assert!(event.source_entity_id.is_none());
        assert!(event.actor_id.is_none());
        assert!(event.payload.is_object());
    }
}
