use crate::span::Span;
use thiserror::Error;

/// Error kinds for categorizing parse and render failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// An emphasis or code delimiter pair is unterminated.
    MalformedInline,
    /// A code, quote or list block lacks its fence, prefix or marker.
    MalformedBlock,
    /// Heading level outside 1-6.
    InvalidHeading,
    /// No level-1 heading line to take a title from.
    MissingTitle,
    /// A parent node with no children (or no tag) was serialized.
    EmptyNode,
    /// Input too large for `u32` byte spans.
    DocumentTooLarge,
}

/// A parse error with its category and, when known, the source location of
/// the block it came from.
///
/// Every error is terminal for the call that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}{}", location(.span))]
pub struct ParseError {
    /// Human-readable error message
    pub message: String,
    /// Source location where the error occurred
    pub span: Option<Span>,
    /// Error categorization
    pub kind: ParseErrorKind,
}

fn location(span: &Option<Span>) -> String {
    match span {
        Some(span) => format!(" at bytes {}..{}", span.start, span.end),
        None => String::new(),
    }
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            span: None,
            kind,
        }
    }

    /// An unterminated `delimiter` pair in inline text.
    pub fn malformed_inline(delimiter: &str) -> Self {
        Self::new(
            ParseErrorKind::MalformedInline,
            format!("invalid markdown, formatted section not closed ({delimiter})"),
        )
    }

    /// A block whose structure does not match its block type.
    pub fn malformed_block(context: &str) -> Self {
        Self::new(
            ParseErrorKind::MalformedBlock,
            format!("malformed {context} block"),
        )
    }

    pub fn invalid_heading(level: usize) -> Self {
        Self::new(
            ParseErrorKind::InvalidHeading,
            format!("invalid heading level {level}, expected 1-6"),
        )
    }

    pub fn missing_title() -> Self {
        Self::new(
            ParseErrorKind::MissingTitle,
            "no level-1 heading (\"# \") found for the title",
        )
    }

    pub fn empty_node(context: &str) -> Self {
        Self::new(ParseErrorKind::EmptyNode, format!("cannot render {context}"))
    }

    pub fn document_too_large(len: usize) -> Self {
        Self::new(
            ParseErrorKind::DocumentTooLarge,
            format!("document of {len} bytes exceeds the {} byte limit", u32::MAX),
        )
    }

    /// Attach a source span unless the error already carries one.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span.get_or_insert(span);
        self
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = ParseError> = std::result::Result<T, E>;
