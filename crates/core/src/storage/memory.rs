use std::collections::HashMap;
use std::sync::Mutex;

use super::traits::{ConfigStore, StorageError};

/// Process-local store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, String>>,
    denied: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that refuses every read and write, like a host with storage disabled
    pub fn unavailable() -> Self {
        Self {
            slots: Mutex::default(),
            denied: true,
        }
    }

    /// Pre-populate a slot
    pub fn with_slot(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let Ok(mut slots) = self.slots.lock() {
            slots.insert(key.into(), value.into());
        }
        self
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.denied {
            return Err(StorageError::Unavailable("access denied".into()));
        }
        Ok(())
    }
}

impl ConfigStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check()?;
        let slots = self
            .slots
            .lock()
            .map_err(|_| StorageError::Unavailable("store lock poisoned".into()))?;
        Ok(slots.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check()?;
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| StorageError::Unavailable("store lock poisoned".into()))?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
