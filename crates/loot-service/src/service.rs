use loot_meta::{MetaError, MetadataStore, SqliteMetadataStore};
use loot_store::{BlobStore, FsBlobStore, Namespace};
use loot_types::{LootEntry, LootId, LootKind, Payload};
use tracing::{debug, error, info, warn};

use crate::audit::{AuditReport, StrayBlob, StrayReason};
use crate::codec;
use crate::config::LootConfig;
use crate::error::{LootError, LootResult};

/// Loot service over a SQLite database and a blob directory.
pub type LocalLootService = LootService<SqliteMetadataStore, FsBlobStore>;

/// Single entry point over the metadata store and the blob store.
///
/// The metadata row is authoritative: an entry exists iff its row exists.
/// Blobs are written after the row and deleted before it, and a missing blob
/// simply means the entry has no payload.
pub struct LootService<M, B> {
    meta: M,
    blobs: B,
}

impl LocalLootService {
    /// Open the SQLite + filesystem stores described by `config`.
    pub fn open(config: &LootConfig) -> LootResult<Self> {
        let blobs = FsBlobStore::open(config.blob_root())?;
        let meta = SqliteMetadataStore::open(&config.database_path())?;
        info!(root = %config.root.display(), "loot store opened");
        Ok(Self::new(meta, blobs))
    }
}

impl<M: MetadataStore, B: BlobStore> LootService<M, B> {
    pub fn new(meta: M, blobs: B) -> Self {
        Self { meta, blobs }
    }

    pub fn metadata(&self) -> &M {
        &self.meta
    }

    pub fn blobs(&self) -> &B {
        &self.blobs
    }

    // ---- Create ----

    /// Store a new entry and return it without its payload.
    ///
    /// The metadata row is inserted first and assigns the id. If the blob
    /// write then fails, the error is returned and the row stays behind as a
    /// metadata-only entry.
    pub fn add(&self, name: &str, kind: LootKind, payload: Payload) -> LootResult<LootEntry> {
        if let Some(actual) = payload.kind().filter(|k| *k != kind) {
            return Err(LootError::InvalidPayload {
                kind,
                payload: actual,
            });
        }
        let blob = codec::encode(&payload)?;

        let record = self.meta.insert(name, kind)?;
        let id = record.id;

        if let Some((ns, bytes)) = blob {
            if let Err(e) = self.blobs.write(ns, &id, &bytes) {
                warn!(%id, %kind, error = %e, "blob write failed; metadata row left without payload");
                return Err(e.into());
            }
        }
        info!(%id, %kind, name, "loot added");

        self.get_by_id(&id).map(LootEntry::strip_payload)
    }

    // ---- Read ----

    /// Fetch an entry and its payload by textual id.
    pub fn get(&self, id: &str) -> LootResult<LootEntry> {
        let id = LootId::parse(id)?;
        self.get_by_id(&id)
    }

    /// Fetch an entry and its payload.
    ///
    /// A missing blob yields an entry with [`Payload::None`]; any other blob
    /// read failure is returned.
    pub fn get_by_id(&self, id: &LootId) -> LootResult<LootEntry> {
        let record = self.meta.find_by_id(id)?;
        let ns = Namespace::for_kind(record.kind);
        let payload = match self.blobs.read(ns, id)? {
            Some(bytes) => codec::decode(record.kind, &bytes)?,
            None => {
                debug!(%id, %ns, "no blob; returning metadata only");
                Payload::None
            }
        };
        Ok(LootEntry::new(
            record.id,
            record.name,
            record.kind,
            record.created_at,
            payload,
        )?)
    }

    // ---- Delete ----

    /// Remove an entry by textual id.
    pub fn remove(&self, id: &str) -> LootResult<()> {
        let id = LootId::parse(id)?;
        self.remove_by_id(&id)
    }

    /// Remove an entry.
    ///
    /// Blobs are deleted from every namespace, whatever the entry's kind.
    /// Blob deletion failures are logged and do not stop the metadata row
    /// from being deleted.
    pub fn remove_by_id(&self, id: &LootId) -> LootResult<()> {
        let record = self.meta.find_by_id(id)?;

        for ns in Namespace::ALL {
            if let Err(e) = self.blobs.delete(ns, id) {
                error!(%id, %ns, error = %e, "failed to delete blob; removing metadata anyway");
            }
        }

        self.meta.delete(id)?;
        info!(%id, kind = %record.kind, "loot removed");
        Ok(())
    }

    // ---- List ----

    /// All entries, oldest first, without payloads.
    pub fn list(&self) -> LootResult<Vec<LootEntry>> {
        Ok(self.meta.find_all()?.into_iter().map(Into::into).collect())
    }

    /// All entries of `kind`, oldest first, without payloads.
    pub fn list_by_kind(&self, kind: LootKind) -> LootResult<Vec<LootEntry>> {
        Ok(self
            .meta
            .find_all_by_kind(kind)?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    // ---- Maintenance ----

    /// Find blobs that no entry will ever read.
    pub fn audit(&self) -> LootResult<AuditReport> {
        let mut report = AuditReport::default();
        for ns in Namespace::ALL {
            for id in self.blobs.list(ns)? {
                report.scanned += 1;
                let reason = match self.meta.find_by_id(&id) {
                    Ok(record) if Namespace::for_kind(record.kind) == ns => continue,
                    Ok(record) => StrayReason::WrongNamespace { kind: record.kind },
                    Err(MetaError::NotFound(_)) => StrayReason::NoMetadata,
                    Err(e) => return Err(e.into()),
                };
                report.stray.push(StrayBlob {
                    namespace: ns,
                    id,
                    reason,
                });
            }
        }
        debug!(scanned = report.scanned, stray = report.stray.len(), "audit complete");
        Ok(report)
    }

    /// Delete every stray blob reported by [`audit`](Self::audit).
    ///
    /// Returns the number of blobs deleted. Metadata rows are never touched.
    pub fn prune_stray(&self) -> LootResult<usize> {
        let report = self.audit()?;
        let mut removed = 0;
        for stray in &report.stray {
            if self.blobs.delete(stray.namespace, &stray.id)? {
                removed += 1;
            }
        }
        if removed > 0 {
            info!(removed, "stray blobs pruned");
        }
        Ok(removed)
    }
}

impl<M, B> std::fmt::Debug for LootService<M, B>
where
    M: std::fmt::Debug,
    B: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LootService")
            .field("meta", &self.meta)
            .field("blobs", &self.blobs)
            .finish()
    }
}
