//! Tests for the HTML node model and its serialization

use mdsite_core::{Attributes, HtmlNode, ParseErrorKind, TextSpan};
use pretty_assertions::assert_eq;

// ============================================================================
// Attribute Tests
// ============================================================================

#[test]
fn test_attributes_to_html() {
    let attrs: Attributes = [("href", "https://www.google.com"), ("target", "_blank")]
        .into_iter()
        .collect();
    assert_eq!(
        attrs.to_html(),
        " href=\"https://www.google.com\" target=\"_blank\""
    );
}

#[test]
fn test_attributes_empty() {
    let attrs = Attributes::new();
    assert!(attrs.is_empty());
    assert_eq!(attrs.to_html(), "");
}

#[test]
fn test_attributes_replace_keeps_position() {
    let mut attrs = Attributes::new();
    attrs.insert("a", "1");
    attrs.insert("b", "2");
    attrs.insert("a", "3");

    assert_eq!(attrs.len(), 2);
    assert_eq!(attrs.get("a"), Some("3"));
    assert_eq!(attrs.iter().collect::<Vec<_>>(), vec![("a", "3"), ("b", "2")]);
}

// ============================================================================
// Leaf Node Tests
// ============================================================================

#[test]
fn test_leaf_to_html_p() {
    let node = HtmlNode::leaf("p", "Hello, world!");
    assert_eq!(node.to_html().unwrap(), "<p>Hello, world!</p>");
}

#[test]
fn test_leaf_to_html_with_attributes() {
    let node = HtmlNode::leaf("a", "Click me!")
        .with_attribute("href", "https://www.google.com")
        .with_attribute("target", "_blank");
    assert_eq!(
        node.to_html().unwrap(),
        "<a href=\"https://www.google.com\" target=\"_blank\">Click me!</a>"
    );
}

#[test]
fn test_leaf_without_tag_is_raw() {
    let node = HtmlNode::text("Just <raw> text");
    assert_eq!(node.tag(), None);
    assert_eq!(node.to_html().unwrap(), "Just <raw> text");
}

#[test]
fn test_leaf_has_no_children() {
    let node = HtmlNode::leaf("b", "x");
    assert!(node.children().is_empty());
    assert_eq!(node.content(), Some("x"));
}

// ============================================================================
// Parent Node Tests
// ============================================================================

#[test]
fn test_parent_with_children() {
    let node = HtmlNode::parent("div", vec![HtmlNode::leaf("span", "child")]);
    assert_eq!(node.to_html().unwrap(), "<div><span>child</span></div>");
}

#[test]
fn test_parent_with_grandchildren() {
    let child = HtmlNode::parent("span", vec![HtmlNode::leaf("b", "grandchild")]);
    let node = HtmlNode::parent("div", vec![child]);
    assert_eq!(
        node.to_html().unwrap(),
        "<div><span><b>grandchild</b></span></div>"
    );
}

#[test]
fn test_parent_mixed_children_no_whitespace() {
    let node = HtmlNode::parent(
        "p",
        vec![
            HtmlNode::leaf("b", "Bold text"),
            HtmlNode::text("Normal text"),
            HtmlNode::leaf("i", "italic text"),
            HtmlNode::text("Normal text"),
        ],
    )
    .with_attribute("class", "intro");
    assert_eq!(
        node.to_html().unwrap(),
        "<p class=\"intro\"><b>Bold text</b>Normal text<i>italic text</i>Normal text</p>"
    );
    assert_eq!(node.content(), None);
}

#[test]
fn test_parent_without_children_fails() {
    let err = HtmlNode::parent("ul", Vec::new()).to_html().unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::EmptyNode);
}

#[test]
fn test_nested_empty_parent_fails() {
    let node = HtmlNode::parent("div", vec![HtmlNode::parent("p", Vec::new())]);
    let err = node.to_html().unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::EmptyNode);
}

#[test]
fn test_parent_without_tag_fails() {
    let err = HtmlNode::parent("", vec![HtmlNode::text("x")])
        .to_html()
        .unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::EmptyNode);
}

// ============================================================================
// Span Conversion Tests
// ============================================================================

#[test]
fn test_span_to_node() {
    let cases = [
        (TextSpan::plain("text"), "text"),
        (TextSpan::bold("bold"), "<b>bold</b>"),
        (TextSpan::italic("it"), "<i>it</i>"),
        (TextSpan::code("x = 1"), "<code>x = 1</code>"),
        (
            TextSpan::link("docs", "/docs/"),
            "<a href=\"/docs/\">docs</a>",
        ),
        (
            TextSpan::image("a cat", "/cat.png"),
            "<img src=\"/cat.png\" alt=\"a cat\"></img>",
        ),
    ];

    for (span, expected) in cases {
        assert_eq!(HtmlNode::from(span).to_html().unwrap(), expected);
    }
}

#[test]
fn test_image_node_attributes() {
    let node = HtmlNode::from(TextSpan::image("alt text", "u.png"));
    assert_eq!(node.tag(), Some("img"));
    assert_eq!(node.content(), Some(""));
    assert_eq!(node.attributes().get("src"), Some("u.png"));
    assert_eq!(node.attributes().get("alt"), Some("alt text"));
}
