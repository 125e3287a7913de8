//! Metadata storage for the loot store.
//!
//! This crate keeps the durable `{id, name, kind}` record of every loot
//! entry. A row here is what makes an entry exist; payload bytes live in
//! `loot-store` and are never seen by this crate.
//!
//! # Architecture
//!
//! - **Identifiers** are assigned by the store on insert, never by callers.
//! - **Kinds** are persisted as small integer codes and filtered by the
//!   backend, not in memory.
//! - **Listings** are ordered oldest first.
//!
//! # Modules
//!
//! - [`error`] -- Error types for metadata operations
//! - [`types`] -- The [`LootRecord`] row type
//! - [`traits`] -- The [`MetadataStore`] trait defining the storage interface
//! - [`sqlite`] -- SQLite-backed [`SqliteMetadataStore`]
//! - [`memory`] -- In-memory [`InMemoryMetadataStore`] for tests

pub mod error;
pub mod memory;
pub mod sqlite;
pub mod traits;
pub mod types;

pub use error::{MetaError, Result};
pub use memory::InMemoryMetadataStore;
pub use sqlite::SqliteMetadataStore;
pub use traits::MetadataStore;
pub use types::LootRecord;
