//! # mdsite core
//!
//! Converts a small, strict subset of Markdown into a tree of HTML nodes and
//! serializes it.
//!
//! Parsing is two-stage. The document is cut into blocks at blank lines and
//! each block is classified (heading, code, quote, list, paragraph) and
//! converted to a node subtree. Text inside those blocks goes through the
//! inline tokenizer, which recognises bold, italic, code spans, images and
//! links.
//!
//! ## Quick Start
//!
//! ```rust
//! use mdsite_core::Parser;
//!
//! let input = "# Hello\n\nThis is **bold** and _italic_.";
//! let page = Parser::new().render(input).unwrap();
//!
//! assert_eq!(page.title, "Hello");
//! assert_eq!(
//!     page.html,
//!     "<div><h1>Hello</h1><p>This is <b>bold</b> and <i>italic</i>.</p></div>"
//! );
//! ```
//!
//! ## Errors
//!
//! Malformed input fails the whole call; there is no partial output.
//!
//! ```rust
//! use mdsite_core::{markdown_to_html, ParseErrorKind};
//!
//! let err = markdown_to_html("an *unclosed emphasis").unwrap_err();
//! assert_eq!(err.kind, ParseErrorKind::MalformedInline);
//! ```

pub mod block;
pub mod convert;
pub mod error;
pub mod inline;
pub mod lexer;
pub mod node;
pub mod parser;
pub mod span;

pub use block::{classify, segment, Block, BlockType};
pub use convert::block_to_node;
pub use error::{ParseError, ParseErrorKind};
pub use inline::tokenize;
pub use node::{Attributes, HtmlNode, SpanKind, TextSpan};
pub use parser::{extract_title, Parser, ParserOptions, RenderedPage};

/// Parse a document with default options.
pub fn parse_document(input: &str) -> error::Result<HtmlNode> {
    Parser::new().parse_document(input)
}

/// Parse a document with default options and serialize it to HTML.
pub fn markdown_to_html(input: &str) -> error::Result<String> {
    Parser::new().to_html(input)
}
