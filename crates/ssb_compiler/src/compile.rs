//! The compile entry points.

use crate::config::CompilerConfig;
use crate::encoder::ContainerWriter;
use crate::error::{CompileError, CompileResult};
use crate::format::FormatVersion;
use crate::scanner::{Scanner, MAX_TAG_LENGTH};
use ssb_storage::OutputSink;

/// Compiles one template into `sink` and returns the segment count.
///
/// The scanner drives the encoder directly: each segment is written as soon
/// as it is found, and the segment stream is never held in memory.
///
/// # Errors
///
/// - [`CompileError::EmptySource`] if `source` is empty (nothing is written)
/// - [`CompileError::InvalidTemplate`] if a tag is too long
/// - [`CompileError::FieldOverflow`] if a length does not fit its field
/// - [`CompileError::Storage`] if writing or patching the sink fails
///
/// # Example
///
/// ```
/// use ssb_compiler::{compile, FormatVersion};
/// use ssb_storage::InMemorySink;
///
/// let mut sink = InMemorySink::new();
/// let count = compile(b"Hi {{name}}!", &mut sink, FormatVersion::Inline).unwrap();
///
/// assert_eq!(count, 3);
/// assert_eq!(&sink.data()[..12], b"SSBTEMPLATE1");
/// ```
pub fn compile(
    source: &[u8],
    sink: &mut dyn OutputSink,
    format: FormatVersion,
) -> CompileResult<u32> {
    compile_segments(source, sink, format, MAX_TAG_LENGTH)
}

/// Compiles one template using the settings in `config`.
///
/// Honors the configured format and tag length limit, and syncs the sink
/// afterwards when `sync_on_finish` is set.
///
/// # Errors
///
/// Same as [`compile`], plus [`CompileError::Storage`] if the final sync fails.
pub fn compile_with(
    source: &[u8],
    sink: &mut dyn OutputSink,
    config: &CompilerConfig,
) -> CompileResult<u32> {
    let count = compile_segments(source, sink, config.format, config.max_tag_length)?;
    if config.sync_on_finish {
        sink.sync()?;
    }
    Ok(count)
}

fn compile_segments(
    source: &[u8],
    sink: &mut dyn OutputSink,
    format: FormatVersion,
    max_tag_len: usize,
) -> CompileResult<u32> {
    if source.is_empty() {
        return Err(CompileError::EmptySource);
    }

    let span = tracing::debug_span!("compile", %format, source_bytes = source.len());
    let _enter = span.enter();

    let mut writer = ContainerWriter::begin(format, sink)?;
    for segment in Scanner::with_max_tag_len(source, max_tag_len) {
        let segment = segment?;
        tracing::trace!(
            kind = segment.kind.as_str(),
            offset = segment.offset,
            len = segment.len,
            "segment"
        );
        writer.push(segment.kind, segment.content(source))?;
    }
    writer.finish()
}
