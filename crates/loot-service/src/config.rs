use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LootError, LootResult};

/// On-disk location of a loot store.
///
/// ```toml
/// root = "/home/op/.loot"
/// database = "loot.db"   # relative paths resolve against root
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LootConfig {
    /// Directory holding the database and the blob namespaces.
    pub root: PathBuf,
    /// SQLite database file.
    pub database: PathBuf,
}

impl Default for LootConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("loot"),
            database: PathBuf::from("loot.db"),
        }
    }
}

impl LootConfig {
    /// Default layout under `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> LootResult<Self> {
        toml::from_str(text).map_err(|e| LootError::Config(e.to_string()))
    }

    /// Load a TOML config file.
    pub fn load(path: &Path) -> LootResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| LootError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Resolved path of the metadata database.
    pub fn database_path(&self) -> PathBuf {
        if self.database.is_absolute() {
            self.database.clone()
        } else {
            self.root.join(&self.database)
        }
    }

    /// Root of the blob namespaces.
    pub fn blob_root(&self) -> &Path {
        &self.root
    }
}
