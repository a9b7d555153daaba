//! Upload storage types.

/// Error type for upload storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Injected failure for {0}")]
    Injected(String),
}

impl From<opendal::Error> for StorageError {
    fn from(error: opendal::Error) -> Self {
        Self::Backend(error.to_string())
    }
}
