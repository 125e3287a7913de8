use thiserror::Error;

use crate::kind::LootKind;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid loot id: {0:?}")]
    InvalidIdentifier(String),

    #[error("unknown loot kind code: {0}")]
    UnknownKind(i64),

    #[error("unknown loot kind name: {0}")]
    UnknownKindName(String),

    #[error("payload of kind {payload} does not match entry kind {kind}")]
    PayloadKindMismatch { kind: LootKind, payload: LootKind },
}
