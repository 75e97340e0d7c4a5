//! Container format versions and header layout.
//!
//! Every container starts with a 12-byte ASCII magic (not NUL-terminated)
//! followed by 32-bit little-endian header fields. The fields are written as
//! zero placeholders when the container is opened and patched once the body
//! is complete.
//!
//! ```text
//! Inline (current):  [magic "SSBTEMPLATE1"][count u32][segments...]
//! Table  (legacy):   [magic "SSBTEMPLATE0"][count u32][table offset u32][body][pad][table]
//! ```

use crate::error::CompileError;
use std::fmt;
use std::str::FromStr;

/// Length of every magic signature.
pub const MAGIC_LEN: usize = 12;

/// Magic of the inline length-prefixed format.
pub const INLINE_MAGIC: [u8; MAGIC_LEN] = *b"SSBTEMPLATE1";

/// Magic of the legacy separate-table format.
pub const TABLE_MAGIC: [u8; MAGIC_LEN] = *b"SSBTEMPLATE0";

/// Width of every header and length field.
pub const FIELD_LEN: usize = 4;

/// Byte written between a tag's length prefix and its content (inline format).
pub const TAG_MARKER: u8 = 0;

/// Alignment of the table in the legacy format.
pub const TABLE_ALIGN: usize = 4;

/// On-disk container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FormatVersion {
    /// Inline length-prefixed segments. Canonical.
    ///
    /// Literal: `len u32`, content. Tag: `len + 1 u32`, `0x00`, content.
    #[default]
    Inline,
    /// Raw concatenated body followed by a table of signed lengths.
    ///
    /// Positive table entries are literals, negative entries are tags.
    Table,
}

impl FormatVersion {
    /// Every supported format.
    pub const ALL: [Self; 2] = [Self::Inline, Self::Table];

    /// Magic signature written at offset 0.
    #[must_use]
    pub const fn magic(self) -> &'static [u8; MAGIC_LEN] {
        match self {
            Self::Inline => &INLINE_MAGIC,
            Self::Table => &TABLE_MAGIC,
        }
    }

    /// Total header length; the body starts here.
    #[must_use]
    pub const fn header_len(self) -> usize {
        match self {
            Self::Inline => MAGIC_LEN + FIELD_LEN,
            Self::Table => MAGIC_LEN + 2 * FIELD_LEN,
        }
    }

    /// Offset of the segment count field.
    #[must_use]
    pub const fn count_offset(self) -> u64 {
        MAGIC_LEN as u64
    }

    /// Offset of the table offset field, for formats that have one.
    #[must_use]
    pub const fn table_offset_field(self) -> Option<u64> {
        match self {
            Self::Inline => None,
            Self::Table => Some((MAGIC_LEN + FIELD_LEN) as u64),
        }
    }

    /// Identifies the format from the first bytes of a container.
    #[must_use]
    pub fn from_magic(bytes: &[u8]) -> Option<Self> {
        let magic = bytes.get(..MAGIC_LEN)?;
        Self::ALL.into_iter().find(|f| f.magic() == magic)
    }

    /// Short lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inline => "inline",
            Self::Table => "table",
        }
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatVersion {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "inline" | "a" | "v1" => Ok(Self::Inline),
            "table" | "b" | "v0" | "legacy" => Ok(Self::Table),
            other => Err(CompileError::invalid_config(format!(
                "unknown container format '{other}' (expected 'inline' or 'table')"
            ))),
        }
    }
}

/// Encodes a 32-bit header or length field.
#[must_use]
pub const fn encode_u32(value: u32) -> [u8; FIELD_LEN] {
    value.to_le_bytes()
}

/// Encodes a signed table entry.
#[must_use]
pub const fn encode_i32(value: i32) -> [u8; FIELD_LEN] {
    value.to_le_bytes()
}

/// Number of zero bytes needed to bring `len` to a multiple of [`TABLE_ALIGN`].
#[must_use]
pub const fn padding_for(len: u64) -> usize {
    let rem = (len % TABLE_ALIGN as u64) as usize;
    if rem == 0 {
        0
    } else {
        TABLE_ALIGN - rem
    }
}
