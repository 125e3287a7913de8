//! The loot service.
//!
//! [`LootService`] is the single entry point applications use to record
//! captured artifacts. It keeps each entry's descriptive row in a
//! [`MetadataStore`] and its payload bytes in a [`BlobStore`], and hides the
//! two tiers behind five operations: add, get, remove, list and
//! list-by-kind.
//!
//! ```no_run
//! use loot_service::{LocalLootService, LootConfig, LootKind, Payload};
//!
//! # fn main() -> loot_service::LootResult<()> {
//! let svc = LocalLootService::open(&LootConfig::with_root("/tmp/loot"))?;
//! let entry = svc.add("notes", LootKind::File, Payload::None)?;
//! let fetched = svc.get(&entry.id().to_string())?;
//! assert_eq!(fetched.name(), "notes");
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod codec;
pub mod config;
pub mod error;
pub mod service;

pub use audit::{AuditReport, StrayBlob, StrayReason};
pub use config::LootConfig;
pub use error::{LootError, LootResult};
pub use service::{LocalLootService, LootService};

// Re-export key types
pub use loot_meta::{InMemoryMetadataStore, MetadataStore, SqliteMetadataStore};
pub use loot_store::{BlobStore, FsBlobStore, InMemoryBlobStore, Namespace};
pub use loot_types::{CredentialRecord, FileBlob, LootEntry, LootId, LootKind, Payload};
