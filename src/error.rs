//! Error types shared by the snippet store and the popup controller.

use thiserror::Error;

/// Failures of the underlying key-value storage area.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage contains invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("quota exceeded: item '{key}' needs {bytes} bytes, limit is {quota}")]
    QuotaExceeded {
        key: String,
        bytes: usize,
        quota: usize,
    },

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised by snippet operations.
#[derive(Debug, Error)]
pub enum SnippetError {
    /// One or more required fields were empty at save time.
    #[error("missing required fields: {}", .missing.join(", "))]
    Validation { missing: Vec<&'static str> },

    #[error("index {index} is out of bounds for {len} snippets")]
    IndexOutOfBounds { index: usize, len: usize },

    /// The last load failed; writing now would replace data that was never read.
    #[error("stored snippets could not be read, refusing to overwrite them")]
    Unreadable,

    #[error("failed to persist snippets: {0}")]
    Persistence(#[from] StorageError),
}
