//! # SSB Compiler
//!
//! Compiles text templates into SSB binary containers.
//!
//! A template is any byte sequence. Regions enclosed in `{{` and `}}` are
//! tags (named placeholders); everything else is literal text. The scanner
//! splits a template into an ordered stream of literal and tag segments and
//! the encoder writes that stream into a container a renderer can load
//! without re-parsing.
//!
//! This crate provides:
//! - [`Scanner`] / [`scan`] for delimiter scanning
//! - [`InlineEncoder`] and [`TableEncoder`] for the two container formats
//! - [`compile`] / [`compile_with`] to drive one template into a sink
//! - [`BatchCompiler`] to compile every template in a directory
//!
//! ## Example
//!
//! ```rust
//! use ssb_compiler::{scan, SegmentKind};
//!
//! let segments = scan(b"Hi {{name}}!").unwrap();
//! let kinds: Vec<_> = segments.iter().map(|s| s.kind).collect();
//! assert_eq!(kinds, [SegmentKind::Literal, SegmentKind::Tag, SegmentKind::Literal]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod batch;
mod compile;
mod config;
mod encoder;
mod error;
mod format;
mod scanner;

pub use batch::{BatchCompiler, BatchHalt, BatchReport, FileOutcome};
pub use compile::{compile, compile_with};
pub use config::CompilerConfig;
pub use encoder::{ContainerWriter, InlineEncoder, SegmentLen, TableEncoder};
pub use error::{CompileError, CompileResult, ErrorClass};
pub use format::{
    padding_for, FormatVersion, FIELD_LEN, INLINE_MAGIC, MAGIC_LEN, TABLE_ALIGN, TABLE_MAGIC,
    TAG_MARKER,
};
pub use scanner::{scan, Scanner, Segment, SegmentKind, CLOSE_SIGIL, MAX_TAG_LENGTH, OPEN_SIGIL};
