//! Error types for storage operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur while acquiring sources or writing sinks.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Attempted to read beyond the bytes written so far.
    #[error("read beyond end of sink: offset {offset}, len {len}, size {size}")]
    ReadPastEnd {
        /// The requested read offset.
        offset: u64,
        /// The requested read length.
        len: usize,
        /// The current sink size.
        size: u64,
    },

    /// A positioned overwrite would extend past the bytes written so far.
    #[error("overwrite beyond end of sink: offset {offset}, len {len}, size {size}")]
    WriteOutOfBounds {
        /// The requested write offset.
        offset: u64,
        /// The requested write length.
        len: usize,
        /// The current sink size.
        size: u64,
    },

    /// The template source has no bytes.
    #[error("template source is empty: {}", path.display())]
    EmptySource {
        /// Path of the empty source (empty for in-memory sources).
        path: PathBuf,
    },
}

impl StorageError {
    /// Creates an empty-source error for the given path.
    pub fn empty_source(path: impl Into<PathBuf>) -> Self {
        Self::EmptySource { path: path.into() }
    }
}
