//! SQLite store with in-memory read cache.

use std::path::Path;
use std::sync::Mutex;

use dashmap::DashMap;
use rusqlite::{Connection, OptionalExtension, params};
use serde_json::Value;

use super::ConfigStore;
use crate::error::StoreError;

/// SQLite-backed preference storage with a DashMap cache.
///
/// Values are stored as JSON text in a single `column_config` table and
/// survive process restarts.
///
/// # Example
///
/// ```ignore
/// use datagrid_lib::store::SqliteStore;
///
/// let store = SqliteStore::open("preferences.db")?;
/// ```
pub struct SqliteStore {
    conn: Mutex<Connection>,
    cache: DashMap<String, Value>,
}

impl SqliteStore {
    /// Opens (or creates) a store at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::init(Connection::open(path)?)
    }

    /// Opens a store that lives only as long as this value.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS column_config (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
            cache: DashMap::new(),
        })
    }

    fn connection(&self) -> Result<std::sync::MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Unavailable("connection lock poisoned".into()))
    }
}

impl ConfigStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        // Check cache first
        if let Some(value) = self.cache.get(key) {
            return Ok(Some(value.clone()));
        }

        let text: Option<String> = self
            .connection()?
            .query_row(
                "SELECT value FROM column_config WHERE key = ?",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        let Some(text) = text else {
            return Ok(None);
        };
        let value: Value = serde_json::from_str(&text)?;
        self.cache.insert(key.to_string(), value.clone());
        Ok(Some(value))
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let text = serde_json::to_string(&value)?;
        self.connection()?.execute(
            "INSERT OR REPLACE INTO column_config (key, value) VALUES (?, ?)",
            params![key, text],
        )?;
        self.cache.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.connection()?
            .execute("DELETE FROM column_config WHERE key = ?", params![key])?;
        self.cache.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_round_trip_in_memory() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert_eq!(store.get("contacts").unwrap(), None);

        store
            .set("contacts", json!({"visibility": {"email": false}}))
            .unwrap();
        assert_eq!(
            store.get("contacts").unwrap(),
            Some(json!({"visibility": {"email": false}}))
        );

        store.remove("contacts").unwrap();
        assert_eq!(store.get("contacts").unwrap(), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let path = std::env::temp_dir().join(format!(
            "datagrid-store-test-{}.db",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        {
            let store = SqliteStore::open(&path).unwrap();
            store.set("billing", json!({"order": ["amount"]})).unwrap();
        }

        let reopened = SqliteStore::open(&path).unwrap();
        assert_eq!(
            reopened.get("billing").unwrap(),
            Some(json!({"order": ["amount"]}))
        );

        drop(reopened);
        let _ = std::fs::remove_file(&path);
    }
}
