//! In-memory metadata store for testing and ephemeral use.
//!
//! [`InMemoryMetadataStore`] stores all rows in a `HashMap` protected by a
//! `RwLock`. It implements the full [`MetadataStore`] trait and is suitable
//! for unit tests and short-lived processes.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;
use loot_types::{LootId, LootKind};

use crate::error::{MetaError, Result};
use crate::traits::MetadataStore;
use crate::types::LootRecord;

/// An in-memory implementation of [`MetadataStore`].
///
/// Data is lost when the store is dropped.
#[derive(Debug, Default)]
pub struct InMemoryMetadataStore {
    rows: RwLock<HashMap<LootId, LootRecord>>,
}

impl InMemoryMetadataStore {
    /// Create a new empty metadata store.
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted(mut rows: Vec<LootRecord>) -> Vec<LootRecord> {
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        rows
    }
}

impl MetadataStore for InMemoryMetadataStore {
    fn insert(&self, name: &str, kind: LootKind) -> Result<LootRecord> {
        let record = LootRecord {
            id: LootId::new(),
            name: name.to_string(),
            kind,
            created_at: Utc::now(),
        };
        let mut rows = self.rows.write().map_err(|_| MetaError::LockPoisoned)?;
        rows.insert(record.id, record.clone());
        Ok(record)
    }

    fn find_by_id(&self, id: &LootId) -> Result<LootRecord> {
        let rows = self.rows.read().map_err(|_| MetaError::LockPoisoned)?;
        rows.get(id).cloned().ok_or(MetaError::NotFound(*id))
    }

    fn find_all(&self) -> Result<Vec<LootRecord>> {
        let rows = self.rows.read().map_err(|_| MetaError::LockPoisoned)?;
        Ok(Self::sorted(rows.values().cloned().collect()))
    }

    fn find_all_by_kind(&self, kind: LootKind) -> Result<Vec<LootRecord>> {
        let rows = self.rows.read().map_err(|_| MetaError::LockPoisoned)?;
        Ok(Self::sorted(
            rows.values().filter(|r| r.kind == kind).cloned().collect(),
        ))
    }

    fn delete(&self, id: &LootId) -> Result<()> {
        let mut rows = self.rows.write().map_err(|_| MetaError::LockPoisoned)?;
        rows.remove(id).map(|_| ()).ok_or(MetaError::NotFound(*id))
    }

    fn count(&self) -> Result<usize> {
        let rows = self.rows.read().map_err(|_| MetaError::LockPoisoned)?;
        Ok(rows.len())
    }
}
