//! Container encoders.
//!
//! Encoders are driven one segment at a time. Each writes its header with
//! zero placeholders in `begin`, streams the body through `push`, and
//! patches the placeholders in `finish` once the totals are known.
//!
//! A sink may already hold bytes; the container starts wherever the magic
//! lands and every patch is relative to that position.

use crate::error::{CompileError, CompileResult};
use crate::format::{
    encode_i32, encode_u32, padding_for, FormatVersion, FIELD_LEN, TABLE_ALIGN, TAG_MARKER,
};
use crate::scanner::SegmentKind;
use ssb_storage::OutputSink;

/// Writes a container in the inline length-prefixed format.
pub struct InlineEncoder<'s> {
    sink: &'s mut dyn OutputSink,
    base: u64,
    count: u32,
    body_len: u64,
}

impl<'s> InlineEncoder<'s> {
    /// Writes the magic and the placeholder segment count.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink write fails.
    pub fn begin(sink: &'s mut dyn OutputSink) -> CompileResult<Self> {
        let format = FormatVersion::Inline;
        let base = sink.append(format.magic())?;
        sink.append(&encode_u32(0))?;

        Ok(Self {
            sink,
            base,
            count: 0,
            body_len: 0,
        })
    }

    /// Appends one segment.
    ///
    /// # Errors
    ///
    /// Returns an error if the content length does not fit its prefix field
    /// or the sink write fails.
    pub fn push(&mut self, kind: SegmentKind, content: &[u8]) -> CompileResult<()> {
        let count = next_count(self.count)?;
        let len = u32::try_from(content.len())
            .map_err(|_| CompileError::field_overflow("segment length", content.len()))?;

        match kind {
            SegmentKind::Literal => {
                self.sink.append(&encode_u32(len))?;
                self.body_len += FIELD_LEN as u64;
            }
            SegmentKind::Tag => {
                let prefix = len
                    .checked_add(1)
                    .ok_or_else(|| CompileError::field_overflow("tag length", content.len()))?;
                self.sink.append(&encode_u32(prefix))?;
                self.sink.append(&[TAG_MARKER])?;
                self.body_len += FIELD_LEN as u64 + 1;
            }
        }
        self.sink.append(content)?;
        self.body_len += content.len() as u64;
        self.count = count;

        Ok(())
    }

    /// Patches the segment count and returns it.
    ///
    /// # Errors
    ///
    /// Returns an error if the patch write fails.
    pub fn finish(self) -> CompileResult<u32> {
        let format = FormatVersion::Inline;
        self.sink
            .write_at(self.base + format.count_offset(), &encode_u32(self.count))?;
        self.sink.flush()?;

        tracing::debug!(
            format = %format,
            segments = self.count,
            body_bytes = self.body_len,
            "finished container"
        );
        Ok(self.count)
    }

    /// Segments pushed so far.
    #[must_use]
    pub fn segment_count(&self) -> u32 {
        self.count
    }
}

/// A table entry of the legacy format before it is packed into a signed integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentLen {
    /// A literal of this many bytes.
    Literal(u32),
    /// A tag of this many bytes.
    Tag(u32),
}

impl SegmentLen {
    /// Packs the entry: positive for literals, negative for tags.
    ///
    /// # Errors
    ///
    /// Returns an error if the length does not fit in 31 bits.
    pub fn to_table_entry(self) -> CompileResult<i32> {
        match self {
            Self::Literal(len) => i32::try_from(len)
                .map_err(|_| CompileError::field_overflow("literal length", u64::from(len))),
            Self::Tag(len) => i32::try_from(len)
                .map(|n| -n)
                .map_err(|_| CompileError::field_overflow("tag length", u64::from(len))),
        }
    }
}

/// Writes a container in the legacy separate-table format.
///
/// The table of segment lengths is owned by the encoder and dropped with it;
/// nothing is shared between compiles.
pub struct TableEncoder<'s> {
    sink: &'s mut dyn OutputSink,
    base: u64,
    table: Vec<SegmentLen>,
    body_len: u64,
}

impl<'s> TableEncoder<'s> {
    /// Writes the magic and both placeholder fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink write fails.
    pub fn begin(sink: &'s mut dyn OutputSink) -> CompileResult<Self> {
        let base = sink.append(FormatVersion::Table.magic())?;
        sink.append(&encode_u32(0))?;
        sink.append(&encode_u32(0))?;

        Ok(Self {
            sink,
            base,
            table: Vec::new(),
            body_len: 0,
        })
    }

    /// Appends one segment's raw content and records its table entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the body or entry would overflow its field or the
    /// sink write fails.
    pub fn push(&mut self, kind: SegmentKind, content: &[u8]) -> CompileResult<()> {
        next_count(u32::try_from(self.table.len()).unwrap_or(u32::MAX))?;
        let len = u32::try_from(content.len())
            .map_err(|_| CompileError::field_overflow("segment length", content.len()))?;
        let entry = match kind {
            SegmentKind::Literal => SegmentLen::Literal(len),
            SegmentKind::Tag => SegmentLen::Tag(len),
        };
        entry.to_table_entry()?;

        let body_len = self.body_len + u64::from(len);
        if body_len > u64::from(u32::MAX) {
            return Err(CompileError::field_overflow("body length", body_len));
        }

        self.sink.append(content)?;
        self.body_len = body_len;
        self.table.push(entry);

        Ok(())
    }

    /// Pads the body, writes the table, patches both header fields, and
    /// returns the segment count.
    ///
    /// # Errors
    ///
    /// Returns an error if a field overflows or a sink write fails.
    pub fn finish(self) -> CompileResult<u32> {
        let format = FormatVersion::Table;
        let count = u32::try_from(self.table.len())
            .map_err(|_| CompileError::field_overflow("segment count", self.table.len()))?;

        let padding = padding_for(self.body_len);
        if padding > 0 {
            self.sink.append(&[0u8; TABLE_ALIGN][..padding])?;
        }
        let table_offset = self.body_len + padding as u64;
        let table_offset = u32::try_from(table_offset)
            .map_err(|_| CompileError::field_overflow("table offset", table_offset))?;

        let mut table = Vec::with_capacity(self.table.len() * FIELD_LEN);
        for entry in &self.table {
            table.extend_from_slice(&encode_i32(entry.to_table_entry()?));
        }
        self.sink.append(&table)?;

        self.sink
            .write_at(self.base + format.count_offset(), &encode_u32(count))?;
        if let Some(field) = format.table_offset_field() {
            self.sink
                .write_at(self.base + field, &encode_u32(table_offset))?;
        }
        self.sink.flush()?;

        tracing::debug!(
            format = %format,
            segments = count,
            body_bytes = self.body_len,
            table_offset,
            "finished container"
        );
        Ok(count)
    }

    /// Segments pushed so far.
    #[must_use]
    pub fn segment_count(&self) -> u32 {
        u32::try_from(self.table.len()).unwrap_or(u32::MAX)
    }
}

/// An encoder for either container format.
pub enum ContainerWriter<'s> {
    /// Inline length-prefixed format.
    Inline(InlineEncoder<'s>),
    /// Legacy separate-table format.
    Table(TableEncoder<'s>),
}

impl<'s> ContainerWriter<'s> {
    /// Opens a container of the given format on `sink`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing the header fails.
    pub fn begin(format: FormatVersion, sink: &'s mut dyn OutputSink) -> CompileResult<Self> {
        Ok(match format {
            FormatVersion::Inline => Self::Inline(InlineEncoder::begin(sink)?),
            FormatVersion::Table => Self::Table(TableEncoder::begin(sink)?),
        })
    }

    /// Appends one segment.
    ///
    /// # Errors
    ///
    /// See [`InlineEncoder::push`] and [`TableEncoder::push`].
    pub fn push(&mut self, kind: SegmentKind, content: &[u8]) -> CompileResult<()> {
        match self {
            Self::Inline(enc) => enc.push(kind, content),
            Self::Table(enc) => enc.push(kind, content),
        }
    }

    /// Completes the container and returns the segment count.
    ///
    /// # Errors
    ///
    /// See [`InlineEncoder::finish`] and [`TableEncoder::finish`].
    pub fn finish(self) -> CompileResult<u32> {
        match self {
            Self::Inline(enc) => enc.finish(),
            Self::Table(enc) => enc.finish(),
        }
    }

    /// The format being written.
    #[must_use]
    pub fn format(&self) -> FormatVersion {
        match self {
            Self::Inline(_) => FormatVersion::Inline,
            Self::Table(_) => FormatVersion::Table,
        }
    }

    /// Segments pushed so far.
    #[must_use]
    pub fn segment_count(&self) -> u32 {
        match self {
            Self::Inline(enc) => enc.segment_count(),
            Self::Table(enc) => enc.segment_count(),
        }
    }
}

fn next_count(count: u32) -> CompileResult<u32> {
    count
        .checked_add(1)
        .ok_or_else(|| CompileError::field_overflow("segment count", u64::from(count) + 1))
}
