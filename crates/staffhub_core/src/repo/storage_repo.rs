//! Durable client-side key/value storage.
//!
//! # Responsibility
//! - Provide the storage seam the session store persists through.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `write` replaces any existing value for the key.
//! - `read` of a missing key is `Ok(None)`, never an error.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage transport errors.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    InvalidKey(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidKey(key) => write!(f, "storage key is invalid: `{key}`"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidKey(_) => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Key/value storage surviving application reloads.
pub trait KeyValueStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>>;
    fn write(&self, key: &str, value: &str) -> StorageResult<()>;
    fn remove(&self, key: &str) -> StorageResult<()>;
}

fn validate_key(key: &str) -> StorageResult<()> {
    if key.trim().is_empty() {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// SQLite-backed storage over the `client_storage` table.
pub struct SqliteKeyValueStorage<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueStorage<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl KeyValueStorage for SqliteKeyValueStorage<'_> {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        validate_key(key)?;
        let value = self
            .conn
            .query_row(
                "SELECT value FROM client_storage WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        validate_key(key)?;
        self.conn.execute(
            "INSERT INTO client_storage (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        validate_key(key)?;
        self.conn
            .execute("DELETE FROM client_storage WHERE key = ?1;", [key])?;
        Ok(())
    }
}

/// Process-local storage for tests and ephemeral shells.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStorage {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryKeyValueStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStorage for MemoryKeyValueStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        validate_key(key)?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        validate_key(key)?;
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        validate_key(key)?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for &T {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyValueStorage, MemoryKeyValueStorage, StorageError};

    #[test]
    fn memory_storage_overwrites_and_removes() {
        let storage = MemoryKeyValueStorage::new();
        storage.write("k", "v1").expect("first write");
        storage.write("k", "v2").expect("second write");
        assert_eq!(storage.read("k").expect("read").as_deref(), Some("v2"));
        assert_eq!(storage.len(), 1);

        storage.remove("k").expect("remove");
        assert!(storage.read("k").expect("read after remove").is_none());
        storage.remove("k").expect("remove missing key is ok");
    }

    #[test]
    fn blank_keys_are_rejected() {
        let storage = MemoryKeyValueStorage::new();
        let err = storage.write(" ", "v").expect_err("blank key");
        assert!(matches!(err, StorageError::InvalidKey(_)));
    }
}
