//! Blob encoding for payloads.
//!
//! A blob holds the bincode encoding of the payload body only
//! ([`FileBlob`] or [`CredentialRecord`]). The variant tag is not written;
//! the namespace the blob lives in already says which type it is.

use loot_store::Namespace;
use loot_types::{CredentialRecord, FileBlob, LootKind, Payload};

use crate::error::{LootError, LootResult};

/// Encode a payload into its namespace and blob bytes.
///
/// Returns `None` for [`Payload::None`]; nothing is written for
/// metadata-only entries.
pub fn encode(payload: &Payload) -> LootResult<Option<(Namespace, Vec<u8>)>> {
    let encoded = match payload {
        Payload::None => return Ok(None),
        Payload::File(file) => (Namespace::Files, bincode::serialize(file)),
        Payload::Credential(cred) => (Namespace::Credentials, bincode::serialize(cred)),
    };
    match encoded {
        (ns, Ok(bytes)) => Ok(Some((ns, bytes))),
        (_, Err(e)) => Err(LootError::Marshal(e.to_string())),
    }
}

/// Decode blob bytes read from the namespace of `kind`.
pub fn decode(kind: LootKind, bytes: &[u8]) -> LootResult<Payload> {
    let payload = match kind {
        LootKind::File => bincode::deserialize::<FileBlob>(bytes).map(Payload::File),
        LootKind::Credential => {
            bincode::deserialize::<CredentialRecord>(bytes).map(Payload::Credential)
        }
    };
    payload.map_err(|e| LootError::Marshal(format!("{kind} blob: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_payload_encodes_to_nothing() {
        assert!(encode(&Payload::None).unwrap().is_none());
    }

    #[test]
    fn payload_goes_to_its_namespace() {
        let (ns, _) = encode(&FileBlob::new("a", vec![1]).into()).unwrap().unwrap();
        assert_eq!(ns, Namespace::Files);
        let (ns, _) = encode(&CredentialRecord::Raw(vec![1]).into()).unwrap().unwrap();
        assert_eq!(ns, Namespace::Credentials);
    }

    #[test]
    fn credential_shapes_survive_encoding() {
        for cred in [
            CredentialRecord::UserPassword {
                user: "admin".into(),
                password: "hunter2".into(),
            },
            CredentialRecord::ApiKey { key: "sk-123".into() },
            CredentialRecord::Raw(vec![0x01, 0x02]),
        ] {
            let payload = Payload::Credential(cred);
            let (_, bytes) = encode(&payload).unwrap().unwrap();
            assert_eq!(decode(LootKind::Credential, &bytes).unwrap(), payload);
        }
    }

    #[test]
    fn truncated_blob_is_marshal_error() {
        let err = decode(LootKind::File, &[0xff, 0x01]).unwrap_err();
        assert!(matches!(err, LootError::Marshal(_)));
    }

    #[test]
    fn unknown_credential_tag_is_marshal_error() {
        // Variant index 9 does not exist.
        let err = decode(LootKind::Credential, &[9, 0, 0, 0]).unwrap_err();
        assert!(matches!(err, LootError::Marshal(_)));
    }
}
