//! In-memory output sink.

use crate::error::{StorageError, StorageResult};
use crate::sink::OutputSink;
use parking_lot::RwLock;

/// An in-memory output sink.
///
/// This sink keeps the whole container in a `Vec<u8>` and is suitable for:
/// - Unit and integration tests
/// - Callers that want compiled bytes without touching the filesystem
///
/// # Example
///
/// ```rust
/// use ssb_storage::{InMemorySink, OutputSink};
///
/// let mut sink = InMemorySink::new();
/// let offset = sink.append(b"test data").unwrap();
/// assert_eq!(offset, 0);
/// assert_eq!(sink.size().unwrap(), 9);
/// ```
#[derive(Debug, Default)]
pub struct InMemorySink {
    data: RwLock<Vec<u8>>,
}

impl InMemorySink {
    /// Creates a new empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sink with pre-existing bytes.
    #[must_use]
    pub fn with_data(data: Vec<u8>) -> Self {
        Self {
            data: RwLock::new(data),
        }
    }

    /// Returns a copy of everything written so far.
    #[must_use]
    pub fn data(&self) -> Vec<u8> {
        self.data.read().clone()
    }

    /// Consumes the sink and returns its bytes.
    #[must_use]
    pub fn into_inner(self) -> Vec<u8> {
        self.data.into_inner()
    }
}

impl OutputSink for InMemorySink {
    fn append(&mut self, new_data: &[u8]) -> StorageResult<u64> {
        let mut data = self.data.write();
        let offset = data.len() as u64;
        data.extend_from_slice(new_data);
        Ok(offset)
    }

    fn write_at(&mut self, offset: u64, bytes: &[u8]) -> StorageResult<()> {
        let mut data = self.data.write();
        let size = data.len() as u64;
        let end = offset.saturating_add(bytes.len() as u64);

        if end > size {
            return Err(StorageError::WriteOutOfBounds {
                offset,
                len: bytes.len(),
                size,
            });
        }

        let start = offset as usize;
        data[start..start + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }

    fn read_at(&self, offset: u64, len: usize) -> StorageResult<Vec<u8>> {
        let data = self.data.read();
        let size = data.len() as u64;
        let offset_usize = offset as usize;
        let end = offset_usize.saturating_add(len);

        if offset > size || end > data.len() {
            return Err(StorageError::ReadPastEnd { offset, len, size });
        }

        Ok(data[offset_usize..end].to_vec())
    }

    fn size(&self) -> StorageResult<u64> {
        Ok(self.data.read().len() as u64)
    }

    fn flush(&mut self) -> StorageResult<()> {
        // Nothing is buffered
        Ok(())
    }

    fn sync(&mut self) -> StorageResult<()> {
        Ok(())
    }
}
