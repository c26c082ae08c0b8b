//! Document assembly: segment, classify, convert, and wrap in a root node.

use tracing::{debug, trace};

use crate::block::segment;
use crate::convert::block_to_node;
use crate::error::{ParseError, Result};
use crate::node::HtmlNode;

/// Tag used for the root container unless configured otherwise.
pub const DEFAULT_ROOT_TAG: &str = "div";

/// Largest document the parser accepts. Spans are `u32` byte offsets.
pub const MAX_DOCUMENT_LEN: usize = u32::MAX as usize;

fn check_document_size(len: usize) -> Result<()> {
    if len > MAX_DOCUMENT_LEN {
        return Err(ParseError::document_too_large(len));
    }
    Ok(())
}

/// Parser configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserOptions {
    /// Tag of the parent node wrapping all blocks.
    pub root_tag: String,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            root_tag: DEFAULT_ROOT_TAG.to_string(),
        }
    }
}

/// A rendered document: serialized HTML plus its title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub title: String,
    pub html: String,
}

/// Markdown parser producing an [`HtmlNode`] tree.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    options: ParserOptions,
}

impl Parser {
    /// Create a parser with default options.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_options(options: ParserOptions) -> Self {
        Self { options }
    }

    /// Override the root container tag.
    pub fn with_root_tag(mut self, tag: impl Into<String>) -> Self {
        self.options.root_tag = tag.into();
        self
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parse a whole document into a root node whose children are the
    /// converted blocks, in document order.
    ///
    /// Fails on the first block that cannot be converted; the error carries
    /// that block's byte span. Input longer than [`MAX_DOCUMENT_LEN`] is
    /// rejected up front.
    pub fn parse_document(&self, input: &str) -> Result<HtmlNode> {
        check_document_size(input.len())?;
        let blocks = segment(input);
        debug!(blocks = blocks.len(), bytes = input.len(), "parsing document");

        let mut children = Vec::with_capacity(blocks.len());
        for (index, block) in blocks.iter().enumerate() {
            let block_type = block.block_type();
            trace!(
                index,
                %block_type,
                start = block.span.start,
                end = block.span.end,
                "classified block"
            );

            let node =
                block_to_node(block.text, block_type).map_err(|e| e.with_span(block.span))?;
            children.push(node);
        }

        Ok(HtmlNode::parent(self.options.root_tag.as_str(), children))
    }

    /// Parse and serialize a document to HTML.
    pub fn to_html(&self, input: &str) -> Result<String> {
        self.parse_document(input)?.to_html()
    }

    /// Parse, serialize, and extract the title in one call.
    pub fn render(&self, input: &str) -> Result<RenderedPage> {
        let html = self.to_html(input)?;
        let title = extract_title(input)?;
        Ok(RenderedPage { title, html })
    }
}

/// Title of a document: the trimmed text of its first `# ` line.
///
/// Only a level-1 heading counts; `## x` lines are skipped.
///
/// ```rust
/// use mdsite_core::extract_title;
///
/// assert_eq!(extract_title("intro\n#  Hello World  ").unwrap(), "Hello World");
/// assert!(extract_title("## only h2").is_err());
/// ```
pub fn extract_title(input: &str) -> Result<String> {
    input
        .lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim().to_string())
        .ok_or_else(ParseError::missing_title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;

    #[test]
    fn document_size_limit() {
        assert!(check_document_size(0).is_ok());
        assert!(check_document_size(MAX_DOCUMENT_LEN).is_ok());
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn document_over_limit_is_rejected() {
        let err = check_document_size(MAX_DOCUMENT_LEN + 1).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::DocumentTooLarge);
        assert_eq!(err.span, None);
    }
}
