use serde::{Deserialize, Serialize};

use crate::kind::LootKind;

/// A captured file: original name plus raw contents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileBlob {
    /// File name as it was on the source host.
    pub name: String,
    /// Raw file contents.
    pub data: Vec<u8>,
}

impl FileBlob {
    /// Create a new file blob.
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Size of the contents in bytes.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// A captured credential.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CredentialRecord {
    /// Username and password pair.
    UserPassword { user: String, password: String },
    /// Bearer token or API key.
    ApiKey { key: String },
    /// Opaque credential material (tickets, key files, hashes).
    Raw(Vec<u8>),
}

impl CredentialRecord {
    /// Short label for the credential shape.
    pub fn label(&self) -> &'static str {
        match self {
            Self::UserPassword { .. } => "user/password",
            Self::ApiKey { .. } => "api key",
            Self::Raw(_) => "raw",
        }
    }
}

// Secrets stay out of logs.
impl std::fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UserPassword { user, .. } => f
                .debug_struct("UserPassword")
                .field("user", user)
                .field("password", &"<redacted>")
                .finish(),
            Self::ApiKey { .. } => f.debug_struct("ApiKey").field("key", &"<redacted>").finish(),
            Self::Raw(bytes) => write!(f, "Raw({} bytes)", bytes.len()),
        }
    }
}

/// Payload carried by a loot entry.
///
/// The variant tag always agrees with the owning entry's [`LootKind`];
/// see [`crate::LootEntry::new`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Payload {
    /// Metadata only, no blob.
    #[default]
    None,
    /// File contents.
    File(FileBlob),
    /// Credential material.
    Credential(CredentialRecord),
}

impl Payload {
    /// The kind this payload belongs to, or `None` for an empty payload.
    pub fn kind(&self) -> Option<LootKind> {
        match self {
            Self::None => None,
            Self::File(_) => Some(LootKind::File),
            Self::Credential(_) => Some(LootKind::Credential),
        }
    }

    /// Whether this payload may be attached to an entry of `kind`.
    ///
    /// An empty payload fits every kind.
    pub fn fits(&self, kind: LootKind) -> bool {
        self.kind().map_or(true, |k| k == kind)
    }

    /// Returns `true` for [`Payload::None`].
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns `true` if a payload is present.
    pub fn is_some(&self) -> bool {
        !self.is_none()
    }
}

impl From<FileBlob> for Payload {
    fn from(file: FileBlob) -> Self {
        Self::File(file)
    }
}

impl From<CredentialRecord> for Payload {
    fn from(cred: CredentialRecord) -> Self {
        Self::Credential(cred)
    }
}
