//! # SSB Storage
//!
//! Byte-level I/O for the SSB template compiler.
//!
//! The compiler consumes exactly two things from its environment: an
//! immutable template buffer and a writable output sink that supports
//! sequential appends plus a later positioned overwrite of header bytes.
//! This crate provides both, and knows nothing about the container format
//! written into the sink.
//!
//! ## Available Types
//!
//! - [`TemplateSource`] - The read-only bytes of one template file
//! - [`OutputSink`] - The append + patch sink trait
//! - [`FileSink`] - Sink backed by a freshly created file
//! - [`InMemorySink`] - Sink backed by a `Vec<u8>`, for tests and in-memory compiles
//!
//! ## Example
//!
//! ```rust
//! use ssb_storage::{InMemorySink, OutputSink};
//!
//! let mut sink = InMemorySink::new();
//! sink.append(b"HEAD\0\0\0\0body").unwrap();
//! sink.write_at(4, &7u32.to_le_bytes()).unwrap();
//! assert_eq!(sink.read_at(4, 4).unwrap(), 7u32.to_le_bytes());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod file;
mod memory;
mod sink;
mod source;

pub use error::{StorageError, StorageResult};
pub use file::FileSink;
pub use memory::InMemorySink;
pub use sink::OutputSink;
pub use source::TemplateSource;
