//! Column configuration storage.
//!
//! Provides a [`ConfigStore`] port and implementations for persisting
//! JSON blobs by string key. Tables write through to the store on every
//! column configuration change and read from it once, at construction.

mod memory;
#[cfg(feature = "sqlite")]
mod sqlite;

pub use memory::*;
#[cfg(feature = "sqlite")]
pub use sqlite::*;

use serde_json::Value;

use crate::error::StoreError;

/// Key-value store for persisted table preferences.
///
/// Calls are synchronous: a column toggle is written before the toggle
/// returns. Errors are reported to the caller, but the table treats them as
/// best-effort and only logs them.
///
/// # Example
///
/// ```
/// use datagrid_lib::store::{ConfigStore, MemoryStore};
/// use serde_json::json;
///
/// let store = MemoryStore::new();
/// store.set("contacts", json!({"order": ["name", "email"]})).unwrap();
/// assert!(store.get("contacts").unwrap().is_some());
/// ```
pub trait ConfigStore: Send + Sync {
    /// Retrieves the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Removes the value stored under `key`.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}
