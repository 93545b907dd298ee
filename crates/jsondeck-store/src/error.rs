//! Error types for the storage layer.
//!
//! [`StoreError`] is only ever seen by code that calls
//! [`Store::save`](crate::Store::save) directly. Reads never fail:
//! [`Store::load`](crate::Store::load) logs the error and degrades to an
//! empty collection.

use std::path::PathBuf;

/// Errors that can occur while reading or writing a backing document.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A filesystem operation failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// The file or directory being accessed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The document parsed as JSON but is not a collection.
    #[error("malformed document {}: {reason}", .path.display())]
    Malformed {
        /// The offending document.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },
}

impl StoreError {
    /// Build an [`StoreError::Io`] for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
