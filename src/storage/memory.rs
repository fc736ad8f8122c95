use std::{collections::HashMap, sync::RwLock};

use uuid::Uuid;

use super::{set_status, upsert, EventRepository, Result};
use crate::{
    errors::StoreError,
    payments::{LifecycleStatus, OwnerId, PaymentEvent},
};

/// Process-local repository, used in tests and as the default for the service layer.
#[derive(Debug, Default)]
pub struct MemoryEventRepository {
    events: RwLock<HashMap<OwnerId, Vec<PaymentEvent>>>,
}

impl MemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventRepository for MemoryEventRepository {
    fn fetch_events_by_owner(&self, owner: &str) -> Result<Vec<PaymentEvent>> {
        let guard = self.events.read().map_err(|_| StoreError::Poisoned)?;
        Ok(guard.get(owner).cloned().unwrap_or_default())
    }

    fn persist_event(&self, event: &PaymentEvent) -> Result<Uuid> {
        let mut guard = self.events.write().map_err(|_| StoreError::Poisoned)?;
        upsert(guard.entry(event.owner_id.clone()).or_default(), event);
        Ok(event.id)
    }

    fn update_status(&self, owner: &str, event_id: Uuid, status: LifecycleStatus) -> Result<()> {
        let mut guard = self.events.write().map_err(|_| StoreError::Poisoned)?;
        let events = guard
            .get_mut(owner)
            .ok_or(StoreError::EventNotFound(event_id))?;
        set_status(events, event_id, status)
    }
}
