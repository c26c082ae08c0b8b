//! Byte ranges into the source document.
//!
//! Blocks produced by the segmenter carry a `Span`, and errors raised while
//! converting a block are tagged with it so callers can point at the
//! offending region of the file.

/// A byte range in the source text, `[start, end)`.
///
/// # Example
///
/// ```rust
/// use mdsite_core::span::Span;
///
/// let doc = "# Title\n\nbody";
/// let span = Span::new(9, 13);
/// assert_eq!(span.len(), 4);
/// assert_eq!(span.slice(doc), Some("body"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Starting byte offset (inclusive).
    pub start: u32,
    /// Ending byte offset (exclusive).
    pub end: u32,
}

impl Span {
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Length of this span in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Smallest span covering both `self` and `other`.
    #[inline]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// The text this span covers in `source`, or `None` if the span does not
    /// fall on valid boundaries of `source`.
    #[inline]
    pub fn slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.start as usize..self.end as usize)
    }
}
