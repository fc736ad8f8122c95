pub mod json_backend;
pub mod memory;

use uuid::Uuid;

use crate::{
    errors::StoreError,
    payments::{LifecycleStatus, PaymentEvent},
};

pub type Result<T> = std::result::Result<T, StoreError>;

/// Document-store boundary. Implementations own ordering and durability;
/// callers persist a generated schedule one event at a time.
pub trait EventRepository: Send + Sync {
    /// All events for `owner`, in the order they were first persisted.
    fn fetch_events_by_owner(&self, owner: &str) -> Result<Vec<PaymentEvent>>;

    /// Inserts the event, or replaces the stored event with the same id.
    fn persist_event(&self, event: &PaymentEvent) -> Result<Uuid>;

    /// Lifecycle transitions belong to the store, never to the bucketing engine.
    fn update_status(&self, owner: &str, event_id: Uuid, status: LifecycleStatus) -> Result<()>;
}

/// Replaces the event with a matching id or appends it.
pub(crate) fn upsert(events: &mut Vec<PaymentEvent>, event: &PaymentEvent) {
    match events.iter_mut().find(|existing| existing.id == event.id) {
        Some(existing) => *existing = event.clone(),
        None => events.push(event.clone()),
    }
}

pub(crate) fn set_status(
    events: &mut [PaymentEvent],
    event_id: Uuid,
    status: LifecycleStatus,
) -> Result<()> {
    let event = events
        .iter_mut()
        .find(|event| event.id == event_id)
        .ok_or(StoreError::EventNotFound(event_id))?;
    event.lifecycle_status = status;
    Ok(())
}

pub use json_backend::JsonEventStore;
pub use memory::MemoryEventRepository;
