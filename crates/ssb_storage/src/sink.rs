//! Output sink trait definition.

use crate::error::StorageResult;

/// A writable output sink for compiled containers.
///
/// Sinks are **opaque byte stores**. The compiler appends header
/// placeholders and body bytes in order, then patches the placeholders in
/// place once their values are known. Sinks do not understand the container
/// format.
///
/// # Invariants
///
/// - `append` returns the offset where data was written
/// - `write_at` only overwrites bytes that were already appended; it never
///   truncates, extends, or moves the append position
/// - `read_at` returns exactly the bytes currently stored at that offset
/// - Sinks must be `Send + Sync`
///
/// # Implementors
///
/// - [`super::InMemorySink`] - For tests and in-memory compiles
/// - [`super::FileSink`] - For container files on disk
pub trait OutputSink: Send + Sync {
    /// Appends data to the end of the sink.
    ///
    /// Returns the offset where the data was written.
    ///
    /// # Errors
    ///
    /// Returns an error if an I/O error occurs.
    fn append(&mut self, data: &[u8]) -> StorageResult<u64>;

    /// Overwrites previously written bytes starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The range `[offset, offset + data.len())` is not fully written yet
    /// - An I/O error occurs
    fn write_at(&mut self, offset: u64, data: &[u8]) -> StorageResult<()>;

    /// Reads `len` bytes starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns an error if the read would extend beyond the current size,
    /// or if an I/O error occurs.
    fn read_at(&self, offset: u64, len: usize) -> StorageResult<Vec<u8>>;

    /// Returns the number of bytes written so far.
    ///
    /// This is the offset where the next `append` will write.
    ///
    /// # Errors
    ///
    /// Returns an error if the size cannot be determined.
    fn size(&self) -> StorageResult<u64>;

    /// Pushes buffered writes to the operating system.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush operation fails.
    fn flush(&mut self) -> StorageResult<()>;

    /// Syncs all data and metadata to durable storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the sync operation fails.
    fn sync(&mut self) -> StorageResult<()>;
}
