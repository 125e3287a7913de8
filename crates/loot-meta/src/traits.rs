//! The [`MetadataStore`] trait defining the metadata storage interface.
//!
//! Any backend (in-memory, SQLite) implements this trait to provide the
//! durable `{id, name, kind}` record of every loot entry.

use loot_types::{LootId, LootKind};

use crate::error::Result;
use crate::types::LootRecord;

/// Storage backend for loot metadata rows.
///
/// Implementations must be thread-safe (`Send + Sync`). A row is the
/// authoritative existence marker for an entry. No operation stores or
/// inspects payload bytes.
pub trait MetadataStore: Send + Sync {
    /// Insert a row for a new entry and return it.
    ///
    /// The store assigns a fresh identifier and creation time. On failure
    /// nothing is persisted.
    fn insert(&self, name: &str, kind: LootKind) -> Result<LootRecord>;

    /// Find a row by identifier.
    ///
    /// Returns `MetaError::NotFound` if no row exists.
    fn find_by_id(&self, id: &LootId) -> Result<LootRecord>;

    /// All rows, oldest first.
    fn find_all(&self) -> Result<Vec<LootRecord>>;

    /// All rows of `kind`, oldest first. Filtering happens in the backend.
    fn find_all_by_kind(&self, kind: LootKind) -> Result<Vec<LootRecord>>;

    /// Delete a row by identifier.
    ///
    /// Returns `MetaError::NotFound` if no row exists.
    fn delete(&self, id: &LootId) -> Result<()>;

    /// Number of rows.
    fn count(&self) -> Result<usize> {
        Ok(self.find_all()?.len())
    }

    /// Check whether a row exists.
    fn contains(&self, id: &LootId) -> Result<bool> {
        match self.find_by_id(id) {
            Ok(_) => Ok(true),
            Err(crate::MetaError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
