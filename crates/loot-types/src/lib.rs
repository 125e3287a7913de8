//! Foundation types for the loot store.
//!
//! This crate provides the identifier, kind and payload types shared by the
//! metadata store, the blob store and the loot service. Every other loot
//! crate depends on `loot-types`.
//!
//! # Key Types
//!
//! - [`LootId`] -- UUID v7 entry identifier, assigned by the metadata store
//! - [`LootKind`] -- `File` or `Credential`, persisted as a small integer code
//! - [`Payload`] -- tagged union of [`FileBlob`] and [`CredentialRecord`]
//! - [`LootEntry`] -- one logical artifact, payload always consistent with kind

pub mod entry;
pub mod error;
pub mod id;
pub mod kind;
pub mod payload;

pub use entry::LootEntry;
pub use error::TypeError;
pub use id::LootId;
pub use kind::LootKind;
pub use payload::{CredentialRecord, FileBlob, Payload};
