//! Host key-value storage for persisted configuration.
//!
//! The host decides where slots live; the configuration manager only reads
//! and writes whole JSON documents by key.

/// A named-slot store holding one text document per key
pub trait ConfigStore: Send + Sync {
    /// Read a slot. A missing slot is `Ok(None)`, not an error.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite a slot
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: ConfigStore + ?Sized> ConfigStore for &T {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).save(key, value)
    }
}

impl<T: ConfigStore + ?Sized> ConfigStore for Box<T> {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).save(key, value)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage I/O failed for slot {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}
