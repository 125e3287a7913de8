use loot_store::Namespace;
use loot_types::{LootId, LootKind};
use serde::Serialize;

/// Why a blob is considered stray.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum StrayReason {
    /// No metadata row exists for the blob's identifier.
    NoMetadata,
    /// A row exists, but its kind stores payloads in another namespace.
    WrongNamespace { kind: LootKind },
}

/// A blob file that no entry will ever read.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StrayBlob {
    pub namespace: Namespace,
    pub id: LootId,
    pub reason: StrayReason,
}

/// Result of scanning both blob namespaces against the metadata store.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    /// Number of blobs examined.
    pub scanned: usize,
    /// Blobs without a matching entry.
    pub stray: Vec<StrayBlob>,
}

impl AuditReport {
    /// Returns `true` if no stray blob was found.
    pub fn is_clean(&self) -> bool {
        self.stray.is_empty()
    }
}
