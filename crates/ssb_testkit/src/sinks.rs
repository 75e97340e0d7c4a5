//! Fault-injecting output sinks.

use ssb_storage::{InMemorySink, OutputSink, StorageError, StorageResult};
use std::io;

/// Where a [`FailingSink`] fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    /// The append after this many successful appends fails.
    AfterAppends(usize),
    /// Every positioned write fails.
    WriteAt,
    /// Flush fails.
    Flush,
    /// Sync fails.
    Sync,
}

/// An in-memory sink that fails at a chosen point.
///
/// Everything written before the failure stays readable through
/// [`FailingSink::data`].
#[derive(Debug)]
pub struct FailingSink {
    inner: InMemorySink,
    fail_at: FailPoint,
    appends: usize,
}

impl FailingSink {
    /// Creates a sink that fails at `fail_at`.
    pub fn new(fail_at: FailPoint) -> Self {
        Self {
            inner: InMemorySink::new(),
            fail_at,
            appends: 0,
        }
    }

    /// Bytes written so far.
    pub fn data(&self) -> Vec<u8> {
        self.inner.data()
    }

    /// Number of successful appends.
    pub fn appends(&self) -> usize {
        self.appends
    }

    fn injected(what: &str) -> StorageError {
        StorageError::Io(io::Error::other(format!("injected {what} failure")))
    }
}

impl OutputSink for FailingSink {
    fn append(&mut self, data: &[u8]) -> StorageResult<u64> {
        if self.fail_at == FailPoint::AfterAppends(self.appends) {
            return Err(Self::injected("append"));
        }
        let offset = self.inner.append(data)?;
        self.appends += 1;
        Ok(offset)
    }

    fn write_at(&mut self, offset: u64, data: &[u8]) -> StorageResult<()> {
        if self.fail_at == FailPoint::WriteAt {
            return Err(Self::injected("write_at"));
        }
        self.inner.write_at(offset, data)
    }

    fn read_at(&self, offset: u64, len: usize) -> StorageResult<Vec<u8>> {
        self.inner.read_at(offset, len)
    }

    fn size(&self) -> StorageResult<u64> {
        self.inner.size()
    }

    fn flush(&mut self) -> StorageResult<()> {
        if self.fail_at == FailPoint::Flush {
            return Err(Self::injected("flush"));
        }
        self.inner.flush()
    }

    fn sync(&mut self) -> StorageResult<()> {
        if self.fail_at == FailPoint::Sync {
            return Err(Self::injected("sync"));
        }
        self.inner.sync()
    }
}
