use std::collections::HashMap;
use std::sync::RwLock;

use loot_types::LootId;

use crate::error::{StoreError, StoreResult};
use crate::namespace::Namespace;
use crate::traits::BlobStore;

/// In-memory, HashMap-based blob store.
///
/// Intended for tests and embedding. Blobs are held behind a `RwLock` and
/// cloned on read/write.
pub struct InMemoryBlobStore {
    blobs: RwLock<HashMap<(Namespace, LootId), Vec<u8>>>,
}

impl InMemoryBlobStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            blobs: RwLock::new(HashMap::new()),
        }
    }

    /// Number of blobs across all namespaces.
    pub fn len(&self) -> usize {
        self.blobs.read().expect("lock poisoned").len()
    }

    /// Returns `true` if no blob is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total bytes across all stored blobs.
    pub fn total_bytes(&self) -> u64 {
        self.blobs
            .read()
            .expect("lock poisoned")
            .values()
            .map(|b| b.len() as u64)
            .sum()
    }
}

impl Default for InMemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BlobStore for InMemoryBlobStore {
    fn write(&self, ns: Namespace, id: &LootId, data: &[u8]) -> StoreResult<()> {
        let mut map = self.blobs.write().map_err(|_| StoreError::LockPoisoned)?;
        map.insert((ns, *id), data.to_vec());
        Ok(())
    }

    fn read(&self, ns: Namespace, id: &LootId) -> StoreResult<Option<Vec<u8>>> {
        let map = self.blobs.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(map.get(&(ns, *id)).cloned())
    }

    fn delete(&self, ns: Namespace, id: &LootId) -> StoreResult<bool> {
        let mut map = self.blobs.write().map_err(|_| StoreError::LockPoisoned)?;
        Ok(map.remove(&(ns, *id)).is_some())
    }

    fn list(&self, ns: Namespace) -> StoreResult<Vec<LootId>> {
        let map = self.blobs.read().map_err(|_| StoreError::LockPoisoned)?;
        let mut ids: Vec<LootId> = map
            .keys()
            .filter(|(n, _)| *n == ns)
            .map(|(_, id)| *id)
            .collect();
        ids.sort();
        Ok(ids)
    }

    fn exists(&self, ns: Namespace, id: &LootId) -> StoreResult<bool> {
        let map = self.blobs.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(map.contains_key(&(ns, *id)))
    }
}

impl std::fmt::Debug for InMemoryBlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryBlobStore")
            .field("blob_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    #[should_panic(expected = "lock poisoned")]
    fn len_does_not_hide_a_poisoned_lock() {
        let store = Arc::new(InMemoryBlobStore::new());
        store.write(Namespace::Files, &LootId::new(), b"x").unwrap();
        let writer = Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _guard = writer.blobs.write().unwrap();
            panic!("writer died holding the lock");
        })
        .join();
        store.len();
    }

    #[test]
    fn write_and_read() {
        let store = InMemoryBlobStore::new();
        let id = LootId::new();
        store.write(Namespace::Files, &id, b"hello").unwrap();
        assert_eq!(store.read(Namespace::Files, &id).unwrap(), Some(b"hello".to_vec()));
    }

    #[test]
    fn namespaces_are_isolated() {
        let store = InMemoryBlobStore::new();
        let id = LootId::new();
        store.write(Namespace::Files, &id, b"file").unwrap();
        assert!(store.read(Namespace::Credentials, &id).unwrap().is_none());
        assert!(!store.exists(Namespace::Credentials, &id).unwrap());
    }

    #[test]
    fn write_overwrites() {
        let store = InMemoryBlobStore::new();
        let id = LootId::new();
        store.write(Namespace::Credentials, &id, b"old").unwrap();
        store.write(Namespace::Credentials, &id, b"new").unwrap();
        assert_eq!(store.read(Namespace::Credentials, &id).unwrap(), Some(b"new".to_vec()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn read_missing_returns_none() {
        let store = InMemoryBlobStore::new();
        assert!(store.read(Namespace::Files, &LootId::new()).unwrap().is_none());
    }

    #[test]
    fn delete_is_idempotent() {
        let store = InMemoryBlobStore::new();
        let id = LootId::new();
        store.write(Namespace::Files, &id, b"x").unwrap();
        assert!(store.delete(Namespace::Files, &id).unwrap());
        assert!(!store.delete(Namespace::Files, &id).unwrap());
        assert!(!store.delete(Namespace::Credentials, &id).unwrap());
    }

    #[test]
    fn list_is_per_namespace_and_sorted() {
        let store = InMemoryBlobStore::new();
        let a = LootId::new();
        let b = LootId::new();
        let c = LootId::new();
        store.write(Namespace::Files, &b, b"b").unwrap();
        store.write(Namespace::Files, &a, b"a").unwrap();
        store.write(Namespace::Credentials, &c, b"c").unwrap();

        let mut expected = vec![a, b];
        expected.sort();
        assert_eq!(store.list(Namespace::Files).unwrap(), expected);
        assert_eq!(store.list(Namespace::Credentials).unwrap(), vec![c]);
    }

    #[test]
    fn total_bytes_and_debug() {
        let store = InMemoryBlobStore::default();
        assert!(store.is_empty());
        store.write(Namespace::Files, &LootId::new(), b"12345").unwrap();
        store.write(Namespace::Credentials, &LootId::new(), b"123").unwrap();
        assert_eq!(store.total_bytes(), 8);
        let debug = format!("{store:?}");
        assert!(debug.contains("blob_count"));
    }
}
