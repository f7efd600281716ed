//! Local key-value storage contracts and implementations.
//!
//! # Responsibility
//! - Provide the per-device string store that holds persisted lists and
//!   map documents.
//! - Keep SQL details inside the repository boundary.
//!
//! # Invariants
//! - `set` overwrites the whole value for a key; there are no partial writes.
//! - Last writer wins; there is no cross-process coordination.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type KvResult<T> = Result<T, KvError>;

/// Errors from key-value storage backends.
#[derive(Debug)]
pub enum KvError {
    Db(DbError),
    /// Connection is missing the `kv_entries` table.
    MissingTable(&'static str),
    /// Key was blank after trimming.
    InvalidKey(String),
}

impl Display for KvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::MissingTable(table) => write!(f, "key-value store requires table `{table}`"),
            Self::InvalidKey(key) => write!(f, "invalid storage key: `{key}`"),
        }
    }
}

impl Error for KvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::MissingTable(_) | Self::InvalidKey(_) => None,
        }
    }
}

impl From<DbError> for KvError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for KvError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Per-device string store keyed by fixed names.
pub trait KeyValueStore {
    /// Reads one value.
    fn get(&self, key: &str) -> KvResult<Option<String>>;
    /// Writes one value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str) -> KvResult<()>;
    /// Deletes one key. Returns whether it existed.
    fn remove(&mut self, key: &str) -> KvResult<bool>;
    /// Lists keys starting with `prefix`, sorted.
    fn keys_with_prefix(&self, prefix: &str) -> KvResult<Vec<String>>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> KvResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> KvResult<bool> {
        (**self).remove(key)
    }

    fn keys_with_prefix(&self, prefix: &str) -> KvResult<Vec<String>> {
        (**self).keys_with_prefix(prefix)
    }
}

/// Process-local store, used in tests and hosts without disk access.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
    entries: BTreeMap<String, String>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        Ok(self.entries.get(validate_key(key)?).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> KvResult<()> {
        let key = validate_key(key)?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> KvResult<bool> {
        Ok(self.entries.remove(validate_key(key)?).is_some())
    }

    fn keys_with_prefix(&self, prefix: &str) -> KvResult<Vec<String>> {
        Ok(self
            .entries
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect())
    }
}

/// SQLite-backed store over the `kv_entries` table.
pub struct SqliteKvStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvStore<'conn> {
    /// Constructs a store from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> KvResult<Self> {
        ensure_kv_table(conn)?;
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteKvStore<'_> {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        let key = validate_key(key)?;
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> KvResult<()> {
        let key = validate_key(key)?;
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> KvResult<bool> {
        let key = validate_key(key)?;
        let changed = self
            .conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(changed > 0)
    }

    fn keys_with_prefix(&self, prefix: &str) -> KvResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM kv_entries WHERE substr(key, 1, length(?1)) = ?1 ORDER BY key ASC;")?;
        let mut rows = stmt.query([prefix])?;
        let mut keys = Vec::new();
        while let Some(row) = rows.next()? {
            keys.push(row.get::<_, String>(0)?);
        }
        Ok(keys)
    }
}

fn validate_key(key: &str) -> KvResult<&str> {
    if key.trim().is_empty() {
        return Err(KvError::InvalidKey(key.to_string()));
    }
    Ok(key)
}

fn ensure_kv_table(conn: &Connection) -> KvResult<()> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = 'kv_entries'
        );",
        [],
        |row| row.get(0),
    )?;
    if exists != 1 {
        return Err(KvError::MissingTable("kv_entries"));
    }
    Ok(())
}
