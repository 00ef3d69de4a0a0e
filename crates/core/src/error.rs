use crate::storage::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Rejected override import or settings document; nothing was applied
    #[error("Invalid configuration: {0}")]
    Validation(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
