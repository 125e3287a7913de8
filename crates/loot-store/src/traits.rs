use loot_types::LootId;

use crate::error::StoreResult;
use crate::namespace::Namespace;

/// Namespaced blob store keyed by loot identifier.
///
/// All implementations must satisfy these invariants:
/// - One blob per `(namespace, id)`; a write replaces any previous blob.
/// - Readers never observe a partially written blob.
/// - A blob that was never written is not an error: `read` returns
///   `Ok(None)` and `delete` returns `Ok(false)`.
/// - The store never interprets blob contents.
/// - All other I/O errors are propagated, never silently ignored.
pub trait BlobStore: Send + Sync {
    /// Create or overwrite the blob for `id` in `ns`.
    fn write(&self, ns: Namespace, id: &LootId, data: &[u8]) -> StoreResult<()>;

    /// Read the blob for `id` in `ns`.
    ///
    /// Returns `Ok(None)` if the blob does not exist.
    /// Returns `Err` on any other I/O failure.
    fn read(&self, ns: Namespace, id: &LootId) -> StoreResult<Option<Vec<u8>>>;

    /// Delete the blob for `id` in `ns`. Returns `true` if the blob existed.
    ///
    /// Deleting an absent blob succeeds, so repeated or partial cleanups
    /// never fail.
    fn delete(&self, ns: Namespace, id: &LootId) -> StoreResult<bool>;

    /// Identifiers of all blobs currently present in `ns`, sorted.
    fn list(&self, ns: Namespace) -> StoreResult<Vec<LootId>>;

    /// Check whether a blob exists.
    ///
    /// Default implementation reads the blob. Backends may override with a
    /// cheaper metadata check.
    fn exists(&self, ns: Namespace, id: &LootId) -> StoreResult<bool> {
        Ok(self.read(ns, id)?.is_some())
    }
}
