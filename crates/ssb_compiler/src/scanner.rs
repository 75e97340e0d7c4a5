//! Single-pass delimiter scanner.
//!
//! Splits template bytes into an ordered stream of literal and tag
//! [`Segment`]s. Tags are the bytes between [`OPEN_SIGIL`] and
//! [`CLOSE_SIGIL`]; everything else is literal. There is no escaping and no
//! nesting: the first `}}` after a `{{` closes the tag.
//!
//! An opening sigil that is never closed is skipped over and its two bytes
//! belong to no segment. The text after it is scanned again as ordinary
//! literal content.

use crate::error::{CompileError, CompileResult};
use memchr::memmem::Finder;
use std::ops::Range;

/// Marker that opens a tag.
pub const OPEN_SIGIL: &[u8] = b"{{";

/// Marker that closes a tag.
pub const CLOSE_SIGIL: &[u8] = b"}}";

/// Longest tag content the container formats can encode (`2^31 - 2`).
pub const MAX_TAG_LENGTH: usize = 2_147_483_646;

/// Kind of a scanned segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// Bytes outside any delimiters, emitted verbatim by the renderer.
    Literal,
    /// The name or expression between `{{` and `}}`.
    Tag,
}

impl SegmentKind {
    /// Returns a lowercase name for display.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Literal => "literal",
            Self::Tag => "tag",
        }
    }
}

/// A classified span of the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    /// Literal or tag.
    pub kind: SegmentKind,
    /// Offset of the first content byte in the source.
    pub offset: usize,
    /// Number of content bytes. Sigils are never included.
    pub len: usize,
}

impl Segment {
    /// Creates a literal segment.
    #[must_use]
    pub const fn literal(offset: usize, len: usize) -> Self {
        Self {
            kind: SegmentKind::Literal,
            offset,
            len,
        }
    }

    /// Creates a tag segment.
    #[must_use]
    pub const fn tag(offset: usize, len: usize) -> Self {
        Self {
            kind: SegmentKind::Tag,
            offset,
            len,
        }
    }

    /// Returns `true` for literal segments.
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self.kind, SegmentKind::Literal)
    }

    /// Returns `true` for tag segments.
    #[must_use]
    pub const fn is_tag(&self) -> bool {
        matches!(self.kind, SegmentKind::Tag)
    }

    /// Offset one past the last content byte.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.offset + self.len
    }

    /// The source range covered by this segment.
    #[must_use]
    pub const fn span(&self) -> Range<usize> {
        self.offset..self.end()
    }

    /// Returns this segment's bytes within `source`.
    ///
    /// # Panics
    ///
    /// Panics if `source` is not the buffer this segment was scanned from
    /// and the span is out of range.
    #[must_use]
    pub fn content<'a>(&self, source: &'a [u8]) -> &'a [u8] {
        &source[self.span()]
    }
}

/// Iterator over the segments of one template.
///
/// Yields `Err(CompileError::InvalidTemplate)` once if a tag exceeds the
/// length limit, and nothing after that.
///
/// # Example
///
/// ```
/// use ssb_compiler::{Scanner, Segment};
///
/// let segments: Vec<Segment> = Scanner::new(b"Hi {{name}}!")
///     .collect::<Result<_, _>>()
///     .unwrap();
///
/// assert_eq!(
///     segments,
///     vec![Segment::literal(0, 3), Segment::tag(5, 4), Segment::literal(11, 1)]
/// );
/// ```
pub struct Scanner<'a> {
    source: &'a [u8],
    pos: usize,
    max_tag_len: usize,
    open: Finder<'static>,
    close: Finder<'static>,
    pending: Option<CompileResult<Segment>>,
    done: bool,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner with the format's tag length limit.
    #[must_use]
    pub fn new(source: &'a [u8]) -> Self {
        Self::with_max_tag_len(source, MAX_TAG_LENGTH)
    }

    /// Creates a scanner that rejects tags longer than `max_tag_len`.
    ///
    /// Limits above [`MAX_TAG_LENGTH`] are clamped to it.
    #[must_use]
    pub fn with_max_tag_len(source: &'a [u8], max_tag_len: usize) -> Self {
        Self {
            source,
            pos: 0,
            max_tag_len: max_tag_len.min(MAX_TAG_LENGTH),
            open: Finder::new(OPEN_SIGIL),
            close: Finder::new(CLOSE_SIGIL),
            pending: None,
            done: false,
        }
    }

    /// Current cursor position in the source.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    fn step(&mut self) -> Option<CompileResult<Segment>> {
        let size = self.source.len();

        loop {
            if self.pos >= size {
                return None;
            }

            let Some(rel) = self.open.find(&self.source[self.pos..]) else {
                let tail = Segment::literal(self.pos, size - self.pos);
                self.pos = size;
                return Some(Ok(tail));
            };

            let found = self.pos + rel;
            // Adjacent tags never get an empty literal between them
            let literal = (found > self.pos).then(|| Segment::literal(self.pos, found - self.pos));
            self.pos = found + OPEN_SIGIL.len();

            let Some(tag_len) = self.close.find(&self.source[self.pos..]) else {
                // Unterminated: the sigil is dropped, the rest is rescanned
                match literal {
                    Some(literal) => return Some(Ok(literal)),
                    None => continue,
                }
            };

            let tag = if tag_len > self.max_tag_len {
                self.done = true;
                Err(CompileError::InvalidTemplate {
                    offset: self.pos,
                    len: tag_len,
                })
            } else {
                Ok(Segment::tag(self.pos, tag_len))
            };
            self.pos += tag_len + CLOSE_SIGIL.len();

            return match literal {
                Some(literal) => {
                    self.pending = Some(tag);
                    Some(Ok(literal))
                }
                None => Some(tag),
            };
        }
    }
}

impl Iterator for Scanner<'_> {
    type Item = CompileResult<Segment>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(pending) = self.pending.take() {
            return Some(pending);
        }
        if self.done {
            return None;
        }

        let item = self.step();
        if item.is_none() {
            self.done = true;
        }
        item
    }
}

impl std::iter::FusedIterator for Scanner<'_> {}

/// Scans a whole template into a vector of segments.
///
/// [`crate::compile`] never buffers the stream; this is for inspection
/// tooling and tests.
///
/// # Errors
///
/// Returns [`CompileError::InvalidTemplate`] if a tag exceeds [`MAX_TAG_LENGTH`].
pub fn scan(source: &[u8]) -> CompileResult<Vec<Segment>> {
    Scanner::new(source).collect()
}
