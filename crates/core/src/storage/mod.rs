//! Storage backends for persisted configuration.

pub mod file;
pub mod memory;
pub mod traits;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use traits::{ConfigStore, StorageError};
