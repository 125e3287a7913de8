//! The metadata row type.

use chrono::{DateTime, Utc};
use loot_types::{LootEntry, LootId, LootKind};
use serde::{Deserialize, Serialize};

/// One metadata row: identity, name and kind of an entry, no payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootRecord {
    pub id: LootId,
    pub name: String,
    pub kind: LootKind,
    pub created_at: DateTime<Utc>,
}

impl LootRecord {
    /// Convert into a payload-free entry.
    pub fn into_entry(self) -> LootEntry {
        LootEntry::metadata_only(self.id, self.name, self.kind, self.created_at)
    }
}

impl From<LootRecord> for LootEntry {
    fn from(record: LootRecord) -> Self {
        record.into_entry()
    }
}
