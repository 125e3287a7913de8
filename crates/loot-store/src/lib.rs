//! Namespaced blob storage for the loot store.
//!
//! Payload bytes live here, one blob per entry, partitioned into one
//! [`Namespace`] per payload-bearing kind and addressed by the entry's
//! [`loot_types::LootId`]. The metadata store, not this crate, decides
//! whether an entry exists.
//!
//! # Storage Backends
//!
//! All backends implement the [`BlobStore`] trait:
//!
//! - [`FsBlobStore`] -- one file per blob under `<root>/<namespace>/<id>`
//! - [`InMemoryBlobStore`] -- `HashMap`-based store for tests and embedding
//!
//! # Design Rules
//!
//! 1. A missing blob is not an error: reads return `None`, deletes `false`.
//! 2. Write-then-rename: readers never see a partially written blob.
//! 3. The store never interprets blob contents.
//! 4. All other I/O errors are propagated, never silently ignored.

pub mod error;
pub mod fs;
pub mod memory;
pub mod namespace;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use fs::FsBlobStore;
pub use memory::InMemoryBlobStore;
pub use namespace::Namespace;
pub use traits::BlobStore;
