use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object not found: {key}")]
    NotFound { key: String },

    #[error("invalid object name: {key}")]
    InvalidKey { key: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid assessment record: {0}")]
    Record(#[from] stride_core::error::CoreError),

    #[error("read error for {key}: {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("write error for {key}: {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("delete error for {key}: {source}")]
    Delete {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("list error for {key}: {source}")]
    List {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    /// Map an I/O failure, folding `NotFound` into [`StorageError::NotFound`].
    pub(crate) fn io(
        key: &str,
        source: std::io::Error,
        wrap: fn(String, std::io::Error) -> StorageError,
    ) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            StorageError::NotFound {
                key: key.to_string(),
            }
        } else {
            wrap(key.to_string(), source)
        }
    }

    pub(crate) fn read(key: String, source: std::io::Error) -> Self {
        StorageError::Read { key, source }
    }

    pub(crate) fn write(key: String, source: std::io::Error) -> Self {
        StorageError::Write { key, source }
    }

    pub(crate) fn delete(key: String, source: std::io::Error) -> Self {
        StorageError::Delete { key, source }
    }

    pub(crate) fn list(key: String, source: std::io::Error) -> Self {
        StorageError::List { key, source }
    }
}
