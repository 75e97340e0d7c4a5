//! File-based output sink.

use crate::error::{StorageError, StorageResult};
use crate::sink::OutputSink;
use parking_lot::RwLock;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// A file-based output sink.
///
/// The file is always created fresh: an existing file at the same path is
/// truncated, so a container is never merged with prior contents.
///
/// Appends go through an in-process buffer. Between calls the OS file
/// position rests at the end of the written data; `write_at` and `read_at`
/// flush the buffer, seek, do their work, and seek back to the end.
///
/// # Durability
///
/// - `flush()` pushes buffered bytes to the OS
/// - `sync()` calls `File::sync_all()` to ensure data is on disk
///
/// # Example
///
/// ```no_run
/// use ssb_storage::{FileSink, OutputSink};
/// use std::path::Path;
///
/// let mut sink = FileSink::create(Path::new("index.ssb")).unwrap();
/// sink.append(b"\0\0\0\0payload").unwrap();
/// sink.write_at(0, &9u32.to_le_bytes()).unwrap();
/// sink.sync().unwrap();
/// ```
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    file: RwLock<BufWriter<File>>,
    size: RwLock<u64>,
}

impl FileSink {
    /// Creates (or truncates) the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created.
    pub fn create(path: &Path) -> StorageResult<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;

        tracing::debug!(path = %path.display(), "created output sink");

        Ok(Self {
            path: path.to_path_buf(),
            file: RwLock::new(BufWriter::new(file)),
            size: RwLock::new(0),
        })
    }

    /// Creates the file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directories cannot be created or the file cannot be created.
    pub fn create_with_dirs(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Self::create(path)
    }

    /// Returns the path to the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputSink for FileSink {
    fn append(&mut self, data: &[u8]) -> StorageResult<u64> {
        if data.is_empty() {
            return Ok(*self.size.read());
        }

        let mut file = self.file.write();
        let mut size = self.size.write();

        let offset = *size;
        file.write_all(data)?;
        *size += data.len() as u64;

        Ok(offset)
    }

    fn write_at(&mut self, offset: u64, data: &[u8]) -> StorageResult<()> {
        let mut file = self.file.write();
        let size = *self.size.read();
        let end = offset.saturating_add(data.len() as u64);

        if end > size {
            return Err(StorageError::WriteOutOfBounds {
                offset,
                len: data.len(),
                size,
            });
        }

        file.flush()?;
        let inner = file.get_mut();
        inner.seek(SeekFrom::Start(offset))?;
        let written = inner.write_all(data);
        // Restore the append position even if the overwrite failed
        inner.seek(SeekFrom::End(0))?;
        written?;

        Ok(())
    }

    fn read_at(&self, offset: u64, len: usize) -> StorageResult<Vec<u8>> {
        let size = *self.size.read();
        let end = offset.saturating_add(len as u64);

        if offset > size || end > size {
            return Err(StorageError::ReadPastEnd { offset, len, size });
        }

        if len == 0 {
            return Ok(Vec::new());
        }

        let mut file = self.file.write();
        file.flush()?;
        let inner = file.get_mut();
        inner.seek(SeekFrom::Start(offset))?;

        let mut buffer = vec![0u8; len];
        let read = inner.read_exact(&mut buffer);
        inner.seek(SeekFrom::End(0))?;
        read?;

        Ok(buffer)
    }

    fn size(&self) -> StorageResult<u64> {
        Ok(*self.size.read())
    }

    fn flush(&mut self) -> StorageResult<()> {
        let mut file = self.file.write();
        file.flush()?;
        Ok(())
    }

    fn sync(&mut self) -> StorageResult<()> {
        let mut file = self.file.write();
        file.flush()?;
        file.get_ref().sync_all()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn file_create_new() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.ssb");

        let sink = FileSink::create(&path).unwrap();
        assert_eq!(sink.size().unwrap(), 0);
        assert!(path.exists());
    }

    #[test]
    fn file_create_truncates_existing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.ssb");
        std::fs::write(&path, b"stale container bytes").unwrap();

        let mut sink = FileSink::create(&path).unwrap();
        assert_eq!(sink.size().unwrap(), 0);
        sink.append(b"new").unwrap();
        sink.flush().unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"new");
    }

    #[test]
    fn file_append_and_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.ssb");

        let mut sink = FileSink::create(&path).unwrap();
        assert_eq!(sink.append(b"hello").unwrap(), 0);
        assert_eq!(sink.append(b" world").unwrap(), 5);
        assert_eq!(sink.size().unwrap(), 11);

        assert_eq!(sink.read_at(0, 11).unwrap(), b"hello world");
        assert_eq!(sink.read_at(6, 5).unwrap(), b"world");
    }

    #[test]
    fn file_write_at_then_append() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.ssb");

        let mut sink = FileSink::create(&path).unwrap();
        sink.append(b"HDR\0\0\0\0").unwrap();
        sink.append(b"body").unwrap();
        sink.write_at(3, &42u32.to_le_bytes()).unwrap();
        sink.append(b"!").unwrap();
        sink.flush().unwrap();

        let on_disk = std::fs::read(&path).unwrap();
        assert_eq!(on_disk, b"HDR\x2a\0\0\0body!");
        assert_eq!(sink.size().unwrap(), 12);
    }

    #[test]
    fn file_write_at_past_end_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.ssb");

        let mut sink = FileSink::create(&path).unwrap();
        sink.append(b"abc").unwrap();

        let result = sink.write_at(2, b"xy");
        assert!(matches!(result, Err(StorageError::WriteOutOfBounds { .. })));
    }

    #[test]
    fn file_read_past_end_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.ssb");

        let mut sink = FileSink::create(&path).unwrap();
        sink.append(b"hello").unwrap();

        let result = sink.read_at(10, 5);
        assert!(matches!(result, Err(StorageError::ReadPastEnd { .. })));
    }

    #[test]
    fn file_drop_flushes_buffer() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.ssb");

        {
            let mut sink = FileSink::create(&path).unwrap();
            sink.append(b"buffered").unwrap();
        }

        assert_eq!(std::fs::read(&path).unwrap(), b"buffered");
    }

    #[test]
    fn file_create_with_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("out").join("test.ssb");

        let sink = FileSink::create_with_dirs(&path).unwrap();
        assert_eq!(sink.path(), path);
        assert!(path.exists());
    }

    #[test]
    fn file_create_in_missing_dir_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("test.ssb");

        let result = FileSink::create(&path);
        assert!(matches!(result, Err(StorageError::Io(_))));
    }

    #[test]
    fn file_flush_and_sync() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.ssb");

        let mut sink = FileSink::create(&path).unwrap();
        sink.append(b"data").unwrap();

        assert!(sink.flush().is_ok());
        assert!(sink.sync().is_ok());
    }
}
