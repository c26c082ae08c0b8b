//! Block segmentation and classification.
//!
//! A document is cut into blocks at blank lines; each block is then
//! classified by looking only at its own text. Classification never fails:
//! anything that is not a recognised structure is a paragraph.

use std::fmt;

use crate::lexer::Lexer;
use crate::span::Span;

/// Fence opening and closing a code block.
pub const CODE_FENCE: &str = "```";

/// Kind of a block, derived from its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    Paragraph,
    /// `#` to `######` followed by a space.
    Heading(u8),
    /// Fenced with a line of three backticks at each end.
    Code,
    /// Every line prefixed with `> `.
    Quote,
    /// Every line prefixed with `- `.
    UnorderedList,
    /// Lines prefixed `1. `, `2. `, ... in strict sequence.
    OrderedList,
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockType::Paragraph => f.write_str("paragraph"),
            BlockType::Heading(level) => write!(f, "heading {level}"),
            BlockType::Code => f.write_str("code"),
            BlockType::Quote => f.write_str("quote"),
            BlockType::UnorderedList => f.write_str("unordered list"),
            BlockType::OrderedList => f.write_str("ordered list"),
        }
    }
}

/// A trimmed, non-empty run of lines borrowed from the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    /// Block text with surrounding whitespace removed.
    pub text: &'a str,
    /// Byte span of `text` in the document.
    pub span: Span,
}

impl<'a> Block<'a> {
    /// Build a block from a region of `document`, trimming it. Returns
    /// `None` when nothing is left after trimming.
    fn from_region(document: &'a str, region: Span) -> Option<Self> {
        let raw = region.slice(document)?;
        let leading = raw.len() - raw.trim_start().len();
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }

        let start = region.start + leading as u32;
        Some(Block {
            text,
            span: Span::new(start, start + text.len() as u32),
        })
    }

    #[inline]
    pub fn block_type(&self) -> BlockType {
        classify(self.text)
    }
}

/// Split a document into blocks at blank lines.
///
/// Runs of empty lines count as a single separator. A line of spaces or tabs
/// is not a separator and stays inside its block; blocks that are empty after
/// trimming are dropped. Blocks are returned in document order.
///
/// Spans are `u32` offsets, so `document` must be smaller than 4 GiB;
/// [`Parser::parse_document`](crate::Parser::parse_document) rejects larger
/// input.
pub fn segment(document: &str) -> Vec<Block<'_>> {
    let mut lexer = Lexer::new(document);
    let mut blocks = Vec::with_capacity(16);

    while !lexer.is_eof() {
        lexer.skip_blank_lines();

        let Some(first) = lexer.next_line() else {
            break;
        };

        let mut region = first.span;
        while let Some(line) = lexer.peek_line() {
            if line.is_blank() {
                break;
            }
            region = region.merge(line.span);
            lexer.next_line();
        }

        if let Some(block) = Block::from_region(document, region) {
            blocks.push(block);
        }
    }

    blocks
}

/// Classify a block. The first matching rule wins; the fallback is
/// [`BlockType::Paragraph`].
pub fn classify(block: &str) -> BlockType {
    if let Some(level) = heading_level(block) {
        return BlockType::Heading(level as u8);
    }

    if is_code_block(block) {
        return BlockType::Code;
    }

    if block.lines().all(|line| strip_quote_prefix(line).is_some()) {
        return BlockType::Quote;
    }

    if block.lines().all(|line| line.starts_with("- ")) {
        return BlockType::UnorderedList;
    }

    if block
        .lines()
        .enumerate()
        .all(|(i, line)| strip_ordered_marker(line, i + 1).is_some())
    {
        return BlockType::OrderedList;
    }

    BlockType::Paragraph
}

/// Number of leading `#` when they form a heading marker: 1 to 6 of them,
/// followed by a space.
pub(crate) fn heading_level(text: &str) -> Option<usize> {
    let level = text.bytes().take_while(|&b| b == b'#').count();
    if (1..=6).contains(&level) && text.as_bytes().get(level) == Some(&b' ') {
        Some(level)
    } else {
        None
    }
}

fn is_code_block(block: &str) -> bool {
    if !block.starts_with(CODE_FENCE) || !block.ends_with(CODE_FENCE) {
        return false;
    }
    let lines: Vec<&str> = block.lines().collect();
    lines.len() >= 3 && lines[0] == CODE_FENCE && lines[lines.len() - 1] == CODE_FENCE
}

/// Quote line content: the text after `> `, or empty for a bare `>`.
pub(crate) fn strip_quote_prefix(line: &str) -> Option<&str> {
    if line == ">" {
        Some("")
    } else {
        line.strip_prefix("> ")
    }
}

/// Item text after an `<n>. ` marker carrying exactly the number `n`.
pub(crate) fn strip_ordered_marker(line: &str, n: usize) -> Option<&str> {
    line.strip_prefix(n.to_string().as_str())?.strip_prefix(". ")
}
