use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};
use uuid::Uuid;

use super::{set_status, upsert, EventRepository, Result};
use crate::{
    core::utils::{ensure_dir, write_atomic, PathResolver},
    errors::StoreError,
    payments::{LifecycleStatus, PaymentEvent},
};

pub const EVENTS_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OwnerEvents {
    schema_version: u32,
    owner_id: String,
    #[serde(default)]
    events: Vec<PaymentEvent>,
}

/// Stores each owner's events as a pretty-printed JSON document under
/// `<root>/events/<owner>.json`.
#[derive(Debug)]
pub struct JsonEventStore {
    events_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonEventStore {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let base = PathResolver::resolve_base(root);
        let events_dir = PathResolver::events_dir_in(&base);
        ensure_dir(&events_dir)?;
        Ok(Self {
            events_dir,
            write_lock: Mutex::new(()),
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn owner_path(&self, owner: &str) -> PathBuf {
        self.events_dir
            .join(format!("{}.json", encode_owner(owner)))
    }

    fn load(&self, owner: &str) -> Result<OwnerEvents> {
        let path = self.owner_path(owner);
        if !path.exists() {
            return Ok(OwnerEvents {
                schema_version: EVENTS_SCHEMA_VERSION,
                owner_id: owner.to_string(),
                events: Vec::new(),
            });
        }
        let data = fs::read_to_string(&path)?;
        let mut document: OwnerEvents = serde_json::from_str(&data)?;
        if document.owner_id != owner {
            tracing::warn!(
                path = %path.display(),
                expected = owner,
                found = %document.owner_id,
                "event file belongs to another owner"
            );
            document.owner_id = owner.to_string();
        }
        let before = document.events.len();
        document.events.retain(|event| event.owner_id == owner);
        if document.events.len() != before {
            tracing::warn!(
                path = %path.display(),
                skipped = before - document.events.len(),
                "skipped events owned by someone else"
            );
        }
        if document.schema_version > EVENTS_SCHEMA_VERSION {
            tracing::warn!(
                path = %path.display(),
                schema_version = document.schema_version,
                "event file written by a newer schema"
            );
        }
        Ok(document)
    }

    fn save(&self, path: &Path, document: &OwnerEvents) -> Result<()> {
        let json = serde_json::to_string_pretty(document)?;
        write_atomic(path, &json)?;
        Ok(())
    }

    fn modify<F>(&self, owner: &str, change: F) -> Result<()>
    where
        F: FnOnce(&mut Vec<PaymentEvent>) -> Result<()>,
    {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut document = self.load(owner)?;
        change(&mut document.events)?;
        document.schema_version = EVENTS_SCHEMA_VERSION;
        self.save(&self.owner_path(owner), &document)
    }
}

impl EventRepository for JsonEventStore {
    fn fetch_events_by_owner(&self, owner: &str) -> Result<Vec<PaymentEvent>> {
        let events = self.load(owner)?.events;
        tracing::debug!(owner, count = events.len(), "loaded payment events");
        Ok(events)
    }

    fn persist_event(&self, event: &PaymentEvent) -> Result<Uuid> {
        self.modify(&event.owner_id, |events| {
            upsert(events, event);
            Ok(())
        })?;
        Ok(event.id)
    }

    fn update_status(&self, owner: &str, event_id: Uuid, status: LifecycleStatus) -> Result<()> {
        self.modify(owner, |events| set_status(events, event_id, status))
    }
}

/// File-system safe owner name. ASCII letters, digits and `-` are kept;
/// every other byte becomes `_` plus two hex digits, so distinct owners
/// always map to distinct files.
fn encode_owner(owner: &str) -> String {
    if owner.is_empty() {
        return "_".into();
    }
    let mut encoded = String::with_capacity(owner.len());
    for byte in owner.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' => encoded.push(byte as char),
            _ => encoded.push_str(&format!("_{byte:02X}")),
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_owner_escapes_path_characters() {
        assert_eq!(encode_owner("uid/../x"), "uid_2F_2E_2E_2Fx");
        assert_eq!(encode_owner("AbC-123"), "AbC-123");
        assert_eq!(encode_owner("  "), "_20_20");
        assert_eq!(encode_owner(""), "_");
        assert_eq!(encode_owner("joão"), "jo_C3_A3o");
    }

    #[test]
    fn similar_owners_get_distinct_files() {
        let names = ["user@a.com", "user.a.com", "user_a_com", "user_40a_2Ecom"];
        let encoded: std::collections::HashSet<String> =
            names.iter().map(|name| encode_owner(name)).collect();
        assert_eq!(encoded.len(), names.len());
    }

    #[test]
    fn missing_owner_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonEventStore::new(Some(dir.path().to_path_buf())).unwrap();
        assert!(store.fetch_events_by_owner("nobody").unwrap().is_empty());
        assert!(!store.owner_path("nobody").exists());
    }
}
