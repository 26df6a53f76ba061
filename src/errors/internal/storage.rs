use thiserror::Error;

/// Content directory errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O error: {operation} '{key}' failed: {source}")]
    Io {
        operation: String,
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Key is not a plain file name inside the content directory
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

impl StorageError {
    pub fn io(operation: &str, key: &str, source: std::io::Error) -> Self {
        StorageError::Io {
            operation: operation.to_string(),
            key: key.to_string(),
            source,
        }
    }
}
