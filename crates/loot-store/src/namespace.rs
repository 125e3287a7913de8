use std::fmt;

use loot_types::LootKind;
use serde::{Deserialize, Serialize};

/// Blob store partition, one per payload-bearing kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Namespace {
    /// Captured files.
    Files,
    /// Captured credentials.
    Credentials,
}

impl Namespace {
    /// Every namespace, in a fixed order.
    pub const ALL: [Namespace; 2] = [Namespace::Files, Namespace::Credentials];

    /// The namespace holding payloads of `kind`.
    pub fn for_kind(kind: LootKind) -> Self {
        match kind {
            LootKind::File => Self::Files,
            LootKind::Credential => Self::Credentials,
        }
    }

    /// The kind whose payloads live here.
    pub fn kind(&self) -> LootKind {
        match self {
            Self::Files => LootKind::File,
            Self::Credentials => LootKind::Credential,
        }
    }

    /// Directory name under the store root.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Files => "files",
            Self::Credentials => "credentials",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_mapping_is_bijective() {
        for kind in LootKind::ALL {
            assert_eq!(Namespace::for_kind(kind).kind(), kind);
        }
        for ns in Namespace::ALL {
            assert_eq!(Namespace::for_kind(ns.kind()), ns);
        }
    }

    #[test]
    fn dir_names_are_distinct() {
        assert_ne!(Namespace::Files.dir_name(), Namespace::Credentials.dir_name());
        assert_eq!(Namespace::Files.to_string(), "files");
        assert_eq!(Namespace::Credentials.to_string(), "credentials");
    }
}
