//! Error types for metadata operations.

use loot_types::LootId;
use thiserror::Error;

/// Errors that can occur during metadata operations.
#[derive(Debug, Error)]
pub enum MetaError {
    /// No row exists for the identifier.
    #[error("loot not found: {0}")]
    NotFound(LootId),

    /// The database rejected or failed a statement.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A stored row could not be decoded into a record.
    #[error("corrupt metadata row: {0}")]
    CorruptRow(String),

    /// A lock guarding the connection or in-memory state was poisoned.
    #[error("metadata store lock poisoned")]
    LockPoisoned,

    /// I/O error while preparing the database location.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for metadata operations.
pub type Result<T> = std::result::Result<T, MetaError>;
