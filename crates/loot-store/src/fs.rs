//! Filesystem-backed blob store.
//!
//! Layout under the store root:
//!
//! ```text
//! <root>/files/<id>
//! <root>/credentials/<id>
//! ```
//!
//! Writes go to a temp file in the namespace directory and are renamed over
//! the target once fully synced, so a reader sees either the old blob, the
//! new blob, or no blob; never a torn one.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use loot_types::LootId;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::namespace::Namespace;
use crate::traits::BlobStore;

#[cfg(unix)]
const DIR_MODE: u32 = 0o700;
#[cfg(unix)]
const BLOB_MODE: u32 = 0o600;

/// Blob store keeping one file per entry under a root directory.
#[derive(Clone, Debug)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    /// Open a store at `root`, creating the namespace directories if needed.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let store = Self { root: root.into() };
        for ns in Namespace::ALL {
            store.ensure_namespace_dir(ns)?;
        }
        debug!(root = %store.root.display(), "opened blob store");
        Ok(store)
    }

    /// The store root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the blobs of `ns`.
    pub fn namespace_dir(&self, ns: Namespace) -> PathBuf {
        self.root.join(ns.dir_name())
    }

    /// Path of the blob for `id` in `ns`.
    pub fn blob_path(&self, ns: Namespace, id: &LootId) -> PathBuf {
        self.namespace_dir(ns).join(id.to_string())
    }

    fn ensure_namespace_dir(&self, ns: Namespace) -> StoreResult<PathBuf> {
        let dir = self.namespace_dir(ns);
        fs::create_dir_all(&dir).map_err(|e| StoreError::at(&dir, e))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&dir, fs::Permissions::from_mode(DIR_MODE))
                .map_err(|e| StoreError::at(&dir, e))?;
        }
        Ok(dir)
    }
}

/// Parse a blob file name, accepting only the form [`FsBlobStore::blob_path`] writes.
fn canonical_id(name: &str) -> Option<LootId> {
    LootId::parse(name).ok().filter(|id| id.to_string() == name)
}

impl BlobStore for FsBlobStore {
    fn write(&self, ns: Namespace, id: &LootId, data: &[u8]) -> StoreResult<()> {
        let dir = self.ensure_namespace_dir(ns)?;
        let path = self.blob_path(ns, id);

        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| StoreError::at(&dir, e))?;
        tmp.write_all(data).map_err(|e| StoreError::at(tmp.path(), e))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| StoreError::at(tmp.path(), e))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tmp.as_file()
                .set_permissions(fs::Permissions::from_mode(BLOB_MODE))
                .map_err(|e| StoreError::at(tmp.path(), e))?;
        }
        tmp.persist(&path)
            .map_err(|e| StoreError::at(&path, e.error))?;

        debug!(%ns, %id, len = data.len(), "blob written");
        Ok(())
    }

    fn read(&self, ns: Namespace, id: &LootId) -> StoreResult<Option<Vec<u8>>> {
        let path = self.blob_path(ns, id);
        match fs::read(&path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::at(path, e)),
        }
    }

    fn delete(&self, ns: Namespace, id: &LootId) -> StoreResult<bool> {
        let path = self.blob_path(ns, id);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(%ns, %id, "blob deleted");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::at(path, e)),
        }
    }

    fn list(&self, ns: Namespace) -> StoreResult<Vec<LootId>> {
        let dir = self.namespace_dir(ns);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::at(dir, e)),
        };

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::at(&dir, e))?;
            if !entry.file_type().map_err(|e| StoreError::at(entry.path(), e))?.is_file() {
                continue;
            }
            // Only canonical names are blobs. Temp files from interrupted
            // writes and other spellings of a UUID are foreign files that
            // read and delete could never reach.
            let name = entry.file_name();
            if let Some(id) = name.to_str().and_then(canonical_id) {
                ids.push(id);
            }
        }
        ids.sort();
        Ok(ids)
    }

    fn exists(&self, ns: Namespace, id: &LootId) -> StoreResult<bool> {
        let path = self.blob_path(ns, id);
        match fs::metadata(&path) {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::at(path, e)),
        }
    }
}
