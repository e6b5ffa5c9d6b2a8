use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::utils;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("failed to create cache directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cached entry is corrupt: {0}")]
    Corrupt(String),

    #[error("failed to serialize cache entry: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("exchange rate {0} is not a positive finite number")]
    InvalidRate(f64),
}

/// Persistent string-to-string storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), CacheError>;
    fn remove(&mut self, key: &str) -> Result<(), CacheError>;
}

pub struct CacheDb {
    conn: Connection,
}

impl CacheDb {
    /// Open the cache in the platform cache directory
    pub fn new() -> Result<Self, CacheError> {
        let cache_dir = Self::get_cache_dir();
        std::fs::create_dir_all(&cache_dir).map_err(|source| CacheError::CreateDir {
            path: cache_dir.clone(),
            source,
        })?;

        Self::open(cache_dir.join("cache.db"))
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, CacheError> {
        let conn = Connection::open(path)?;

        let mut cache = CacheDb { conn };
        cache.init_schema()?;

        Ok(cache)
    }

    pub fn new_in_memory() -> Result<Self, CacheError> {
        let conn = Connection::open_in_memory()?;

        let mut cache = CacheDb { conn };
        cache.init_schema()?;

        Ok(cache)
    }

    fn get_cache_dir() -> PathBuf {
        if let Some(cache_dir) = dirs::cache_dir() {
            cache_dir.join("balibuddy")
        } else {
            utils::get_cache_fallback_path()
        }
    }

    fn init_schema(&mut self) -> Result<(), CacheError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            ) WITHOUT ROWID;
            ",
        )?;

        Ok(())
    }
}

impl KeyValueStore for CacheDb {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CacheError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, CURRENT_TIMESTAMP)",
            params![key, value],
        )?;

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), CacheError> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        Ok(())
    }
}

/// Volatile store, used when no database can be opened and in tests
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
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

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CacheError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), CacheError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Either backend, picked at startup
pub enum AnyStore {
    Sqlite(CacheDb),
    Memory(MemoryStore),
}

impl KeyValueStore for AnyStore {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        match self {
            AnyStore::Sqlite(db) => db.get(key),
            AnyStore::Memory(mem) => mem.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CacheError> {
        match self {
            AnyStore::Sqlite(db) => db.set(key, value),
            AnyStore::Memory(mem) => mem.set(key, value),
        }
    }

    fn remove(&mut self, key: &str) -> Result<(), CacheError> {
        match self {
            AnyStore::Sqlite(db) => db.remove(key),
            AnyStore::Memory(mem) => mem.remove(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise_store(store: &mut dyn KeyValueStore) {
        assert_eq!(store.get("missing").unwrap(), None);

        store.set("k", "first").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("first"));

        // Last write wins
        store.set("k", "second").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("second"));

        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);

        // Removing an absent key is fine
        store.remove("k").unwrap();
    }

    #[test]
    fn test_sqlite_store_roundtrip() {
        let mut db = CacheDb::new_in_memory().unwrap();
        exercise_store(&mut db);
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let mut mem = MemoryStore::new();
        exercise_store(&mut mem);
        assert!(mem.is_empty());
    }

    #[test]
    fn test_any_store_delegates() {
        let mut store = AnyStore::Memory(MemoryStore::new());
        exercise_store(&mut store);

        let mut store = AnyStore::Sqlite(CacheDb::new_in_memory().unwrap());
        exercise_store(&mut store);
    }

    #[test]
    fn test_keys_are_independent() {
        let mut db = CacheDb::new_in_memory().unwrap();
        db.set("a", "1").unwrap();
        db.set("b", "2").unwrap();
        db.remove("a").unwrap();
        assert_eq!(db.get("b").unwrap().as_deref(), Some("2"));
    }
}
