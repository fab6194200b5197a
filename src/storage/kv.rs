//! Key-value storage slots
//!
//! The expense collection lives in a single named slot holding a JSON
//! document. `FileStore` maps each key to `<dir>/<key>.json`; `MemoryStore`
//! keeps slots in memory for tests and embedding.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use crate::error::ExpenseError;

use super::file_io::{read_text, write_atomic};

/// A synchronous string-valued key-value store
pub trait KeyValueStore: Send + Sync {
    /// Raw value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>, ExpenseError>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<(), ExpenseError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, ExpenseError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ExpenseError> {
        (**self).set(key, value)
    }
}

/// Store backed by one JSON file per key
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// File holding the value for `key`
    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, ExpenseError> {
        read_text(self.slot_path(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ExpenseError> {
        write_atomic(self.slot_path(key), value)
    }
}

/// Store that lives only in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with one slot already filled
    pub fn with_value(key: &str, value: &str) -> Self {
        Self {
            slots: RwLock::new(HashMap::from([(key.to_string(), value.to_string())])),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, ExpenseError> {
        let slots = self.slots.read().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ExpenseError> {
        let mut slots = self.slots.write().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
