//! In-memory store implementation using DashMap

use dashmap::DashMap;
use serde_json::Value;

use super::ConfigStore;
use crate::error::StoreError;

/// An in-memory store backed by a concurrent hash map.
///
/// Values are lost when the process exits. Useful for tests and for
/// sharing preferences between tables within one session.
#[derive(Debug, Default)]
pub struct MemoryStore {
    store: DashMap<String, Value>,
}

impl MemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self {
            store: DashMap::new(),
        }
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl ConfigStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.store.get(key).map(|entry| entry.value().clone()))
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.store.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.store.remove(key);
        Ok(())
    }
}
