//! SQLite-backed metadata store.
//!
//! One table, one row per entry. The kind column holds the small integer
//! code from [`LootKind::code`], and `created_at` holds an RFC 3339 UTC
//! timestamp with nanosecond precision so text order equals time order.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use loot_types::{LootId, LootKind};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use crate::error::{MetaError, Result};
use crate::traits::MetadataStore;
use crate::types::LootRecord;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS loot (
        id          TEXT PRIMARY KEY,
        name        TEXT NOT NULL,
        kind        INTEGER NOT NULL,
        created_at  TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_loot_kind
        ON loot(kind);
";

const SELECT_COLUMNS: &str = "SELECT id, name, kind, created_at FROM loot";

/// Raw column values, decoded outside the rusqlite row callback so decode
/// failures map to [`MetaError::CorruptRow`].
type RawRow = (String, String, i64, String);

/// Metadata store persisted in a SQLite database.
pub struct SqliteMetadataStore {
    conn: Mutex<Connection>,
}

impl SqliteMetadataStore {
    /// Open (or create) the database at `path` and run migrations.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        let store = Self::from_connection(conn)?;
        debug!(path = %path.display(), "opened metadata database");
        Ok(store)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    fn run_migrations(&self) -> Result<()> {
        self.conn()?.execute_batch(SCHEMA)?;
        debug!("metadata migrations complete");
        Ok(())
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| MetaError::LockPoisoned)
    }

    fn query(&self, sql: &str, kind: Option<LootKind>) -> Result<Vec<LootRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(sql)?;
        let raw: Vec<RawRow> = match kind {
            Some(kind) => stmt
                .query_map(params![kind.code()], read_raw)?
                .collect::<rusqlite::Result<_>>()?,
            None => stmt.query_map([], read_raw)?.collect::<rusqlite::Result<_>>()?,
        };
        raw.into_iter().map(decode_row).collect()
    }
}

fn read_raw(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn decode_row((id, name, kind, created_at): RawRow) -> Result<LootRecord> {
    let id = LootId::parse(&id).map_err(|e| MetaError::CorruptRow(e.to_string()))?;
    let kind = LootKind::from_code(kind)
        .map_err(|e| MetaError::CorruptRow(format!("{id}: {e}")))?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| MetaError::CorruptRow(format!("{id}: bad created_at: {e}")))?;
    Ok(LootRecord {
        id,
        name,
        kind,
        created_at,
    })
}

impl MetadataStore for SqliteMetadataStore {
    fn insert(&self, name: &str, kind: LootKind) -> Result<LootRecord> {
        let record = LootRecord {
            id: LootId::new(),
            name: name.to_string(),
            kind,
            created_at: Utc::now(),
        };
        self.conn()?.execute(
            "INSERT INTO loot (id, name, kind, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                record.id.to_string(),
                record.name,
                record.kind.code(),
                record.created_at.to_rfc3339_opts(SecondsFormat::Nanos, true),
            ],
        )?;
        debug!(id = %record.id, %kind, "metadata row inserted");
        Ok(record)
    }

    fn find_by_id(&self, id: &LootId) -> Result<LootRecord> {
        let raw = self
            .conn()?
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE id = ?1"),
                params![id.to_string()],
                read_raw,
            )
            .optional()?;
        match raw {
            Some(raw) => decode_row(raw),
            None => Err(MetaError::NotFound(*id)),
        }
    }

    fn find_all(&self) -> Result<Vec<LootRecord>> {
        self.query(&format!("{SELECT_COLUMNS} ORDER BY created_at, id"), None)
    }

    fn find_all_by_kind(&self, kind: LootKind) -> Result<Vec<LootRecord>> {
        self.query(
            &format!("{SELECT_COLUMNS} WHERE kind = ?1 ORDER BY created_at, id"),
            Some(kind),
        )
    }

    fn delete(&self, id: &LootId) -> Result<()> {
        let changed = self
            .conn()?
            .execute("DELETE FROM loot WHERE id = ?1", params![id.to_string()])?;
        if changed == 0 {
            return Err(MetaError::NotFound(*id));
        }
        debug!(%id, "metadata row deleted");
        Ok(())
    }

    fn count(&self) -> Result<usize> {
        let n: i64 = self
            .conn()?
            .query_row("SELECT count(*) FROM loot", [], |row| row.get(0))?;
        Ok(n as usize)
    }
}

impl std::fmt::Debug for SqliteMetadataStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteMetadataStore").finish_non_exhaustive()
    }
}
