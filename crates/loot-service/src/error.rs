use loot_meta::MetaError;
use loot_store::StoreError;
use loot_types::{LootId, LootKind, TypeError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LootError {
    #[error("invalid loot id: {0:?}")]
    InvalidIdentifier(String),

    #[error("loot not found: {0}")]
    NotFound(LootId),

    #[error("invalid payload: {payload} payload for a {kind} entry")]
    InvalidPayload { kind: LootKind, payload: LootKind },

    #[error("metadata store error: {0}")]
    Metadata(MetaError),

    #[error("blob store error: {0}")]
    Blob(#[from] StoreError),

    #[error("marshal error: {0}")]
    Marshal(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl LootError {
    /// Whether the error came from a failed read or write in either store.
    pub fn is_io_failure(&self) -> bool {
        matches!(self, Self::Metadata(_) | Self::Blob(_))
    }
}

impl From<MetaError> for LootError {
    fn from(err: MetaError) -> Self {
        match err {
            MetaError::NotFound(id) => Self::NotFound(id),
            other => Self::Metadata(other),
        }
    }
}

impl From<TypeError> for LootError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::InvalidIdentifier(s) => Self::InvalidIdentifier(s),
            TypeError::PayloadKindMismatch { kind, payload } => {
                Self::InvalidPayload { kind, payload }
            }
            other => Self::Marshal(other.to_string()),
        }
    }
}

pub type LootResult<T> = Result<T, LootError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_not_found_maps_to_not_found() {
        let id = LootId::new();
        let err: LootError = MetaError::NotFound(id).into();
        assert!(matches!(err, LootError::NotFound(x) if x == id));
        assert!(!err.is_io_failure());
    }

    #[test]
    fn metadata_failures_are_io_failures() {
        let err: LootError = MetaError::LockPoisoned.into();
        assert!(err.is_io_failure());
        let err: LootError = StoreError::LockPoisoned.into();
        assert!(err.is_io_failure());
    }

    #[test]
    fn type_errors_map_to_service_kinds() {
        let err: LootError = TypeError::InvalidIdentifier("nope".into()).into();
        assert!(matches!(err, LootError::InvalidIdentifier(s) if s == "nope"));

        let err: LootError = TypeError::PayloadKindMismatch {
            kind: LootKind::File,
            payload: LootKind::Credential,
        }
        .into();
        assert!(matches!(err, LootError::InvalidPayload { .. }));
    }

    #[test]
    fn display_messages() {
        let err = LootError::InvalidPayload {
            kind: LootKind::File,
            payload: LootKind::Credential,
        };
        assert_eq!(err.to_string(), "invalid payload: credential payload for a file entry");
    }
}
