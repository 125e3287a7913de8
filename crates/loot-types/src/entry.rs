use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::id::LootId;
use crate::kind::LootKind;
use crate::payload::Payload;

/// One logical artifact tracked by the loot store.
///
/// Fields are private so the payload/kind agreement established by
/// [`LootEntry::new`] cannot be broken afterwards. Deserialization goes
/// through the same check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EntryFields")]
pub struct LootEntry {
    id: LootId,
    name: String,
    kind: LootKind,
    created_at: DateTime<Utc>,
    payload: Payload,
}

/// Wire shape of [`LootEntry`] before validation.
#[derive(Deserialize)]
struct EntryFields {
    id: LootId,
    name: String,
    kind: LootKind,
    created_at: DateTime<Utc>,
    #[serde(default)]
    payload: Payload,
}

impl TryFrom<EntryFields> for LootEntry {
    type Error = TypeError;

    fn try_from(f: EntryFields) -> Result<Self, Self::Error> {
        Self::new(f.id, f.name, f.kind, f.created_at, f.payload)
    }
}

impl LootEntry {
    /// Build an entry, rejecting a payload that does not match `kind`.
    pub fn new(
        id: LootId,
        name: impl Into<String>,
        kind: LootKind,
        created_at: DateTime<Utc>,
        payload: Payload,
    ) -> Result<Self, TypeError> {
        if let Some(actual) = payload.kind() {
            if actual != kind {
                return Err(TypeError::PayloadKindMismatch {
                    kind,
                    payload: actual,
                });
            }
        }
        Ok(Self {
            id,
            name: name.into(),
            kind,
            created_at,
            payload,
        })
    }

    /// Build a metadata-only entry.
    pub fn metadata_only(
        id: LootId,
        name: impl Into<String>,
        kind: LootKind,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            created_at,
            payload: Payload::None,
        }
    }

    pub fn id(&self) -> LootId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> LootKind {
        self.kind
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Take the payload out, consuming the entry.
    pub fn into_payload(self) -> Payload {
        self.payload
    }

    /// Drop the payload, keeping identity, name and kind.
    pub fn strip_payload(mut self) -> Self {
        self.payload = Payload::None;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{CredentialRecord, FileBlob};

    #[test]
    fn matching_payload_accepted() {
        let entry = LootEntry::new(
            LootId::new(),
            "creds1",
            LootKind::Credential,
            Utc::now(),
            CredentialRecord::Raw(vec![0x01, 0x02]).into(),
        )
        .unwrap();
        assert_eq!(entry.kind(), LootKind::Credential);
        assert!(entry.payload().is_some());
    }

    #[test]
    fn mismatched_payload_rejected() {
        let err = LootEntry::new(
            LootId::new(),
            "x",
            LootKind::Credential,
            Utc::now(),
            FileBlob::new("x", vec![1]).into(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            TypeError::PayloadKindMismatch {
                kind: LootKind::Credential,
                payload: LootKind::File,
            }
        );
    }

    #[test]
    fn empty_payload_accepted_for_any_kind() {
        for kind in LootKind::ALL {
            let entry = LootEntry::new(LootId::new(), "x", kind, Utc::now(), Payload::None);
            assert!(entry.is_ok());
        }
    }

    #[test]
    fn strip_payload_keeps_identity() {
        let id = LootId::new();
        let entry = LootEntry::new(
            id,
            "file1",
            LootKind::File,
            Utc::now(),
            FileBlob::new("f", vec![9; 4]).into(),
        )
        .unwrap()
        .strip_payload();
        assert_eq!(entry.id(), id);
        assert_eq!(entry.name(), "file1");
        assert_eq!(entry.kind(), LootKind::File);
        assert!(entry.payload().is_none());
    }

    #[test]
    fn deserialize_keeps_valid_entry() {
        let entry = LootEntry::new(
            LootId::new(),
            "creds1",
            LootKind::Credential,
            Utc::now(),
            CredentialRecord::ApiKey { key: "k".into() }.into(),
        )
        .unwrap();
        let json = serde_json::to_string(&entry).unwrap();
        let back: LootEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn deserialize_rejects_mismatched_kind() {
        let entry = LootEntry::new(
            LootId::new(),
            "f",
            LootKind::File,
            Utc::now(),
            FileBlob::new("f", vec![1, 2]).into(),
        )
        .unwrap();
        let mut json = serde_json::to_value(&entry).unwrap();
        json["kind"] = serde_json::Value::from("credential");

        let err = serde_json::from_value::<LootEntry>(json).unwrap_err();
        assert!(err.to_string().contains("payload"), "{err}");
    }
}
