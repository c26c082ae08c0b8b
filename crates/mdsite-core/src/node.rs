//! Node model: inline text spans and the HTML node tree.
//!
//! The inline tokenizer produces [`TextSpan`]s; the block converter turns
//! them into [`HtmlNode`] leaves and wraps them in parent nodes. Nothing in
//! this module mutates a value after it has been built, so serializing the
//! same tree twice always yields the same string.

use crate::error::{ParseError, Result};

/// Semantic kind of an inline span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    /// Unformatted text.
    Plain,
    /// `**bold**`
    Bold,
    /// `*italic*` or `_italic_`
    Italic,
    /// `` `code` ``
    Code,
    /// `[text](url)`
    Link,
    /// `![alt](url)`
    Image,
}

impl SpanKind {
    /// Whether spans of this kind carry a URL.
    #[inline]
    pub const fn has_url(self) -> bool {
        matches!(self, SpanKind::Link | SpanKind::Image)
    }
}

/// A contiguous run of inline text with a single kind.
///
/// `url` is present exactly when the kind is [`SpanKind::Link`] or
/// [`SpanKind::Image`]; the constructors enforce this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    content: String,
    kind: SpanKind,
    url: Option<String>,
}

impl TextSpan {
    pub fn plain(content: impl Into<String>) -> Self {
        Self::styled(content, SpanKind::Plain)
    }

    pub fn bold(content: impl Into<String>) -> Self {
        Self::styled(content, SpanKind::Bold)
    }

    pub fn italic(content: impl Into<String>) -> Self {
        Self::styled(content, SpanKind::Italic)
    }

    pub fn code(content: impl Into<String>) -> Self {
        Self::styled(content, SpanKind::Code)
    }

    /// A link span; `content` is the link text.
    pub fn link(content: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind: SpanKind::Link,
            url: Some(url.into()),
        }
    }

    /// An image span; `content` is the alt text.
    pub fn image(alt: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            content: alt.into(),
            kind: SpanKind::Image,
            url: Some(url.into()),
        }
    }

    /// Span of a url-less kind. Delimiter passes only ever produce these.
    pub(crate) fn styled(content: impl Into<String>, kind: SpanKind) -> Self {
        debug_assert!(!kind.has_url(), "{kind:?} spans need a url");
        Self {
            content: content.into(),
            kind,
            url: None,
        }
    }

    #[inline]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[inline]
    pub fn kind(&self) -> SpanKind {
        self.kind
    }

    #[inline]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    #[inline]
    pub fn is_plain(&self) -> bool {
        self.kind == SpanKind::Plain
    }
}

/// HTML attributes in insertion order.
///
/// Serialized as ` key="value"` for each pair, so the output is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`. An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render as a string of ` key="value"` pairs.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        for (key, value) in &self.entries {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for (k, v) in iter {
            attrs.insert(k, v);
        }
        attrs
    }
}

/// Terminal node: raw text, or a single tag wrapping text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafNode {
    tag: Option<String>,
    content: String,
    attributes: Attributes,
}

impl LeafNode {
    #[inline]
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Container node owning its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentNode {
    tag: String,
    children: Vec<HtmlNode>,
    attributes: Attributes,
}

/// A node in the rendered HTML tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlNode {
    Leaf(LeafNode),
    Parent(ParentNode),
}

impl HtmlNode {
    /// Untagged leaf; renders as its content.
    pub fn text(content: impl Into<String>) -> Self {
        HtmlNode::Leaf(LeafNode {
            tag: None,
            content: content.into(),
            attributes: Attributes::new(),
        })
    }

    /// Leaf rendered as `<tag>content</tag>`.
    pub fn leaf(tag: impl Into<String>, content: impl Into<String>) -> Self {
        HtmlNode::Leaf(LeafNode {
            tag: Some(tag.into()),
            content: content.into(),
            attributes: Attributes::new(),
        })
    }

    pub fn parent(tag: impl Into<String>, children: Vec<HtmlNode>) -> Self {
        HtmlNode::Parent(ParentNode {
            tag: tag.into(),
            children,
            attributes: Attributes::new(),
        })
    }

    /// Builder-style attribute setter.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        match &mut self {
            HtmlNode::Leaf(leaf) => leaf.attributes.insert(key, value),
            HtmlNode::Parent(parent) => parent.attributes.insert(key, value),
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            HtmlNode::Leaf(leaf) => leaf.tag.as_deref(),
            HtmlNode::Parent(parent) => Some(&parent.tag),
        }
    }

    pub fn attributes(&self) -> &Attributes {
        match self {
            HtmlNode::Leaf(leaf) => &leaf.attributes,
            HtmlNode::Parent(parent) => &parent.attributes,
        }
    }

    /// Children of a parent node; always empty for a leaf.
    pub fn children(&self) -> &[HtmlNode] {
        match self {
            HtmlNode::Leaf(_) => &[],
            HtmlNode::Parent(parent) => &parent.children,
        }
    }

    /// Leaf content, `None` for a parent.
    pub fn content(&self) -> Option<&str> {
        match self {
            HtmlNode::Leaf(leaf) => Some(leaf.content()),
            HtmlNode::Parent(_) => None,
        }
    }

    /// Serialize the tree depth-first with no whitespace between siblings.
    ///
    /// Fails with `EmptyNode` if any parent has no tag or no children.
    pub fn to_html(&self) -> Result<String> {
        let mut out = String::new();
        self.write_html(&mut out)?;
        Ok(out)
    }

    fn write_html(&self, out: &mut String) -> Result<()> {
        match self {
            HtmlNode::Leaf(leaf) => {
                match &leaf.tag {
                    Some(tag) => {
                        open_tag(out, tag, &leaf.attributes);
                        out.push_str(&leaf.content);
                        close_tag(out, tag);
                    }
                    None => out.push_str(&leaf.content),
                }
                Ok(())
            }
            HtmlNode::Parent(parent) => {
                if parent.tag.is_empty() {
                    return Err(ParseError::empty_node("parent node without a tag"));
                }
                if parent.children.is_empty() {
                    return Err(ParseError::empty_node(&format!(
                        "<{}> parent node without children",
                        parent.tag
                    )));
                }
                open_tag(out, &parent.tag, &parent.attributes);
                for child in &parent.children {
                    child.write_html(out)?;
                }
                close_tag(out, &parent.tag);
                Ok(())
            }
        }
    }
}

#[inline]
fn open_tag(out: &mut String, tag: &str, attributes: &Attributes) {
    out.push('<');
    out.push_str(tag);
    attributes.write_html(out);
    out.push('>');
}

#[inline]
fn close_tag(out: &mut String, tag: &str) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

impl From<TextSpan> for HtmlNode {
    fn from(span: TextSpan) -> Self {
        let TextSpan { content, kind, url } = span;
        let url = url.unwrap_or_default();
        match kind {
            SpanKind::Plain => HtmlNode::text(content),
            SpanKind::Bold => HtmlNode::leaf("b", content),
            SpanKind::Italic => HtmlNode::leaf("i", content),
            SpanKind::Code => HtmlNode::leaf("code", content),
            SpanKind::Link => HtmlNode::leaf("a", content).with_attribute("href", url),
            SpanKind::Image => HtmlNode::leaf("img", "")
                .with_attribute("src", url)
                .with_attribute("alt", content),
        }
    }
}
