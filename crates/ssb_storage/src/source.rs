//! Template source acquisition.

use crate::error::{StorageError, StorageResult};
use std::path::{Path, PathBuf};

/// The immutable bytes of one template.
///
/// A source is acquired once per compile and only ever read. Acquisition
/// rejects zero-length templates: an empty file produces no container and is
/// reported the same way as a file that cannot be read.
#[derive(Debug, Clone)]
pub struct TemplateSource {
    path: Option<PathBuf>,
    bytes: Vec<u8>,
}

impl TemplateSource {
    /// Reads the whole template at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, or
    /// [`StorageError::EmptySource`] if it has no bytes.
    pub fn open(path: &Path) -> StorageResult<Self> {
        let bytes = std::fs::read(path)?;
        if bytes.is_empty() {
            return Err(StorageError::empty_source(path));
        }

        tracing::debug!(path = %path.display(), size = bytes.len(), "acquired template source");

        Ok(Self {
            path: Some(path.to_path_buf()),
            bytes,
        })
    }

    /// Wraps in-memory template bytes.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::EmptySource`] if `bytes` is empty.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> StorageResult<Self> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(StorageError::empty_source(PathBuf::new()));
        }
        Ok(Self { path: None, bytes })
    }

    /// Returns the template bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the number of template bytes. Never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always `false`; empty sources are rejected at acquisition.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the path the source was read from, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl AsRef<[u8]> for TemplateSource {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn open_reads_whole_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("index.html");
        std::fs::write(&path, b"Hi {{name}}!").unwrap();

        let source = TemplateSource::open(&path).unwrap();
        assert_eq!(source.as_bytes(), b"Hi {{name}}!");
        assert_eq!(source.len(), 12);
        assert_eq!(source.path(), Some(path.as_path()));
    }

    #[test]
    fn open_empty_file_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.html");
        std::fs::write(&path, b"").unwrap();

        let result = TemplateSource::open(&path);
        assert!(matches!(result, Err(StorageError::EmptySource { .. })));
    }

    #[test]
    fn open_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let result = TemplateSource::open(&dir.path().join("missing.html"));
        assert!(matches!(result, Err(StorageError::Io(_))));
    }

    #[test]
    fn from_bytes_rejects_empty() {
        assert!(matches!(
            TemplateSource::from_bytes(Vec::new()),
            Err(StorageError::EmptySource { .. })
        ));

        let source = TemplateSource::from_bytes(b"hello".to_vec()).unwrap();
        assert!(source.path().is_none());
        assert!(!source.is_empty());
    }
}
