use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// The kind of a loot entry.
///
/// The kind is persisted as a small integer code in the metadata store, so
/// the codes below are part of the on-disk format and must never change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LootKind {
    /// An opaque file blob.
    File,
    /// A structured credential record.
    Credential,
}

impl LootKind {
    /// All kinds, in code order.
    pub const ALL: [LootKind; 2] = [LootKind::File, LootKind::Credential];

    /// Persisted integer code.
    pub fn code(&self) -> i64 {
        match self {
            Self::File => 0,
            Self::Credential => 1,
        }
    }

    /// Decode a persisted integer code.
    pub fn from_code(code: i64) -> Result<Self, TypeError> {
        match code {
            0 => Ok(Self::File),
            1 => Ok(Self::Credential),
            other => Err(TypeError::UnknownKind(other)),
        }
    }

    /// Lowercase name used in CLI arguments and output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Credential => "credential",
        }
    }
}

impl fmt::Display for LootKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LootKind {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "credential" | "cred" => Ok(Self::Credential),
            _ => Err(TypeError::UnknownKindName(s.to_string())),
        }
    }
}
