use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid storage key: {key}")]
    InvalidKey { key: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("read error for key {key}: {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("write error for key {key}: {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("remove error for key {key}: {source}")]
    Remove {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("storage lock poisoned")]
    Poisoned,
}
