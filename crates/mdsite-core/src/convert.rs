//! Block-to-node conversion.
//!
//! Each converter takes the trimmed block text and returns a parent node.
//! Inline content goes through [`tokenize`]; code blocks are kept verbatim.

use crate::block::{
    heading_level, strip_ordered_marker, strip_quote_prefix, BlockType, CODE_FENCE,
};
use crate::error::{ParseError, Result};
use crate::inline::tokenize;
use crate::node::HtmlNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListStyle {
    Unordered,
    Ordered,
}

impl ListStyle {
    fn tag(self) -> &'static str {
        match self {
            ListStyle::Unordered => "ul",
            ListStyle::Ordered => "ol",
        }
    }

    /// Item text of the `index`-th (1-based) line.
    fn strip_marker(self, line: &str, index: usize) -> Option<&str> {
        match self {
            ListStyle::Unordered => line.strip_prefix("- "),
            ListStyle::Ordered => strip_ordered_marker(line, index),
        }
    }
}

/// Convert one block of the given type into its node subtree.
pub fn block_to_node(block: &str, block_type: BlockType) -> Result<HtmlNode> {
    match block_type {
        BlockType::Paragraph => paragraph_to_node(block),
        BlockType::Heading(level) => heading_to_node(block, level),
        BlockType::Code => code_to_node(block),
        BlockType::Quote => quote_to_node(block),
        BlockType::UnorderedList => list_to_node(block, ListStyle::Unordered),
        BlockType::OrderedList => list_to_node(block, ListStyle::Ordered),
    }
}

/// Tokenize inline text and map every span to a leaf node.
pub fn text_to_children(text: &str) -> Result<Vec<HtmlNode>> {
    Ok(tokenize(text)?.into_iter().map(HtmlNode::from).collect())
}

fn paragraph_to_node(block: &str) -> Result<HtmlNode> {
    let text = block.lines().collect::<Vec<_>>().join(" ");
    Ok(HtmlNode::parent("p", text_to_children(&text)?))
}

fn heading_to_node(block: &str, level: u8) -> Result<HtmlNode> {
    let level = usize::from(level);
    if !(1..=6).contains(&level) {
        return Err(ParseError::invalid_heading(level));
    }
    if heading_level(block) != Some(level) {
        return Err(ParseError::invalid_heading(level));
    }

    // Marker is `level` hashes and one space.
    let text = &block[level + 1..];
    Ok(HtmlNode::parent(format!("h{level}"), text_to_children(text)?))
}

fn code_to_node(block: &str) -> Result<HtmlNode> {
    let inner = block
        .strip_prefix(CODE_FENCE)
        .and_then(|rest| rest.strip_suffix(CODE_FENCE))
        .ok_or_else(|| ParseError::malformed_block("code"))?;

    let content = inner
        .strip_prefix("\r\n")
        .or_else(|| inner.strip_prefix('\n'))
        .unwrap_or(inner);

    Ok(HtmlNode::parent("pre", vec![HtmlNode::leaf("code", content)]))
}

fn quote_to_node(block: &str) -> Result<HtmlNode> {
    let lines = block
        .lines()
        .map(|line| strip_quote_prefix(line).ok_or_else(|| ParseError::malformed_block("quote")))
        .collect::<Result<Vec<_>>>()?;

    Ok(HtmlNode::parent(
        "blockquote",
        text_to_children(&lines.join("\n"))?,
    ))
}

fn list_to_node(block: &str, style: ListStyle) -> Result<HtmlNode> {
    let mut items = Vec::new();

    for (i, line) in block.lines().enumerate() {
        let text = style
            .strip_marker(line, i + 1)
            .ok_or_else(|| ParseError::malformed_block("list"))?;
        items.push(HtmlNode::parent("li", text_to_children(text)?));
    }

    Ok(HtmlNode::parent(style.tag(), items))
}
