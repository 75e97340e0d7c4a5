//! Error types for the compiler crate.

use ssb_storage::StorageError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for compiler operations.
pub type CompileResult<T> = Result<T, CompileError>;

/// How a failure affects the rest of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The batch could not start (bad configuration, unreadable directory).
    Setup,
    /// A source or sink could not be obtained. Halts the batch.
    Acquisition,
    /// The template could not be encoded. File-local.
    Format,
    /// Writing or patching the sink failed. File-local.
    Io,
}

/// Errors that can occur while compiling templates.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The template source has no bytes.
    #[error("template source is empty")]
    EmptySource,

    /// A template source or output sink could not be obtained.
    #[error("cannot acquire {}: {source}", path.display())]
    Acquire {
        /// The file that could not be read or created.
        path: PathBuf,
        /// The underlying storage failure.
        #[source]
        source: StorageError,
    },

    /// A tag is longer than the container format can encode.
    #[error("invalid template format: check file size or tag name sizes")]
    InvalidTemplate {
        /// Byte offset of the tag content in the source.
        offset: usize,
        /// Length of the tag content in bytes.
        len: usize,
    },

    /// A header or length field would not fit in its on-disk width.
    #[error("{field} of {value} does not fit in a 32-bit container field")]
    FieldOverflow {
        /// Name of the overflowing field.
        field: &'static str,
        /// The value that did not fit.
        value: u64,
    },

    /// Writing or patching the output sink failed.
    #[error("{0}")]
    Storage(#[from] StorageError),

    /// The input directory could not be enumerated.
    #[error("cannot read directory {}: {message}", path.display())]
    Walk {
        /// The directory being listed.
        path: PathBuf,
        /// Description of the failure.
        message: String,
    },

    /// The compiler configuration is invalid.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the problem.
        message: String,
    },
}

impl CompileError {
    /// Creates an acquisition error for `path`.
    pub fn acquire(path: impl Into<PathBuf>, source: StorageError) -> Self {
        match source {
            StorageError::EmptySource { .. } => Self::EmptySource,
            source => Self::Acquire {
                path: path.into(),
                source,
            },
        }
    }

    /// Creates a field overflow error.
    pub fn field_overflow(field: &'static str, value: impl TryInto<u64>) -> Self {
        Self::FieldOverflow {
            field,
            value: value.try_into().unwrap_or(u64::MAX),
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Returns how this error affects the rest of a batch.
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Walk { .. } | Self::InvalidConfig { .. } => ErrorClass::Setup,
            Self::EmptySource | Self::Acquire { .. } => ErrorClass::Acquisition,
            Self::InvalidTemplate { .. } | Self::FieldOverflow { .. } => ErrorClass::Format,
            Self::Storage(_) => ErrorClass::Io,
        }
    }

    /// Returns `true` if no further files should be attempted after this error.
    #[must_use]
    pub fn is_batch_fatal(&self) -> bool {
        matches!(self.class(), ErrorClass::Setup | ErrorClass::Acquisition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn classification() {
        assert_eq!(CompileError::EmptySource.class(), ErrorClass::Acquisition);
        assert_eq!(
            CompileError::InvalidTemplate { offset: 2, len: 9 }.class(),
            ErrorClass::Format
        );
        let write = CompileError::Storage(StorageError::Io(io::Error::other("disk full")));
        assert_eq!(write.class(), ErrorClass::Io);
        assert_eq!(
            CompileError::invalid_config("bad").class(),
            ErrorClass::Setup
        );
    }

    #[test]
    fn only_setup_and_acquisition_halt_a_batch() {
        let acquire = CompileError::acquire(
            "a.html",
            StorageError::Io(io::Error::new(io::ErrorKind::PermissionDenied, "denied")),
        );
        assert!(acquire.is_batch_fatal());
        assert!(CompileError::EmptySource.is_batch_fatal());

        assert!(!CompileError::InvalidTemplate { offset: 0, len: 0 }.is_batch_fatal());
        assert!(!CompileError::field_overflow("literal length", u64::MAX).is_batch_fatal());
        let write = CompileError::Storage(StorageError::Io(io::Error::other("disk full")));
        assert!(!write.is_batch_fatal());
    }

    #[test]
    fn empty_storage_source_maps_to_empty_source() {
        let err = CompileError::acquire("x.html", StorageError::empty_source("x.html"));
        assert!(matches!(err, CompileError::EmptySource));
    }

    #[test]
    fn invalid_template_message_is_fixed() {
        let a = CompileError::InvalidTemplate { offset: 1, len: 2 }.to_string();
        let b = CompileError::InvalidTemplate { offset: 90, len: 3 }.to_string();
        assert_eq!(a, b);
        assert_eq!(a, "invalid template format: check file size or tag name sizes");
    }

    #[test]
    fn io_errors_carry_os_description() {
        let err = CompileError::from(StorageError::Io(io::Error::new(
            io::ErrorKind::Other,
            "No space left on device",
        )));
        assert!(err.to_string().contains("No space left on device"));
    }
}
