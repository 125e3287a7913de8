use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Unique identifier for a loot entry (UUID v7 for time-ordering).
///
/// Identifiers are assigned by the metadata store at insert time and never
/// supplied by clients. The canonical text form is the hyphenated lowercase
/// UUID, which is also the blob file name in every namespace.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LootId(uuid::Uuid);

impl LootId {
    /// Generate a new time-ordered loot ID (UUID v7).
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }

    /// Create from an existing UUID.
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Parse the textual form of an identifier.
    ///
    /// Surrounding whitespace is not accepted; callers pass the id exactly as
    /// it was handed out.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        uuid::Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| TypeError::InvalidIdentifier(s.to_string()))
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }

    /// Short representation (first 8 characters of the UUID).
    pub fn short_id(&self) -> String {
        self.0.to_string()[..8].to_string()
    }
}

impl Default for LootId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for LootId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for LootId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LootId({})", self.short_id())
    }
}

impl fmt::Display for LootId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ids_are_unique() {
        let a = LootId::new();
        let b = LootId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn new_ids_are_version_7() {
        let id = LootId::new();
        assert_eq!(id.as_uuid().get_version_num(), 7);
    }

    #[test]
    fn display_is_hyphenated_uuid() {
        let id = LootId::new();
        let text = id.to_string();
        assert_eq!(text.len(), 36);
        assert_eq!(text.matches('-').count(), 4);
        assert_eq!(LootId::parse(&text).unwrap(), id);
    }

    #[test]
    fn parse_accepts_uppercase() {
        let id = LootId::parse("0190F2A4-7B3C-7D2E-8F10-123456789ABC").unwrap();
        assert_eq!(id.to_string(), "0190f2a4-7b3c-7d2e-8f10-123456789abc");
    }

    #[test]
    fn parse_rejects_malformed() {
        for bad in ["", "not-a-uuid", "1234", "0190f2a4-7b3c-7d2e-8f10", " 0190f2a4-7b3c-7d2e-8f10-123456789abc"] {
            let err = LootId::parse(bad).unwrap_err();
            assert_eq!(err, TypeError::InvalidIdentifier(bad.to_string()));
        }
    }

    #[test]
    fn from_str_matches_parse() {
        let id = LootId::new();
        let parsed: LootId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn short_id_is_prefix() {
        let id = LootId::new();
        assert!(id.to_string().starts_with(&id.short_id()));
        assert_eq!(id.short_id().len(), 8);
    }

    #[test]
    fn serde_roundtrip() {
        let id = LootId::new();
        let json = serde_json::to_string(&id).unwrap();
        let parsed: LootId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }
}
