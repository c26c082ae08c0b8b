//! JSON views of parsed node trees and errors.

use mdsite_core::{HtmlNode, ParseError};
use serde::Serialize;

use crate::site::SiteError;

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum JsonNode<'a> {
    Leaf {
        #[serde(skip_serializing_if = "Option::is_none")]
        tag: Option<&'a str>,
        content: &'a str,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        attributes: Vec<(&'a str, &'a str)>,
    },
    Parent {
        tag: &'a str,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        attributes: Vec<(&'a str, &'a str)>,
        children: Vec<JsonNode<'a>>,
    },
}

#[derive(Debug, Serialize)]
pub struct JsonError {
    pub message: String,
    pub kind: String,
    pub span: Option<JsonSpan>,
}

#[derive(Debug, Serialize)]
pub struct JsonSpan {
    pub start: u32,
    pub end: u32,
}

#[derive(Debug, Serialize)]
pub struct JsonValidation {
    pub file: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonError>,
}

pub fn convert_node(node: &HtmlNode) -> JsonNode<'_> {
    let attributes = node.attributes().iter().collect();
    match node {
        HtmlNode::Leaf(_) => JsonNode::Leaf {
            tag: node.tag(),
            content: node.content().unwrap_or_default(),
            attributes,
        },
        HtmlNode::Parent(_) => JsonNode::Parent {
            tag: node.tag().unwrap_or_default(),
            attributes,
            children: node.children().iter().map(convert_node).collect(),
        },
    }
}

pub fn convert_error(error: &ParseError) -> JsonError {
    JsonError {
        message: error.message.clone(),
        kind: format!("{:?}", error.kind),
        span: error.span.map(|s| JsonSpan {
            start: s.start,
            end: s.end,
        }),
    }
}

/// Per-file failure: parse errors keep their kind and span, anything else
/// is reported by its underlying cause.
pub fn convert_site_error(error: &SiteError) -> JsonError {
    let (message, kind) = match error {
        SiteError::Parse { source, .. } => return convert_error(source),
        SiteError::Io { source, .. } => (source.to_string(), "Io"),
        SiteError::Config { source, .. } => (source.to_string(), "Config"),
    };
    JsonError {
        message,
        kind: kind.to_string(),
        span: None,
    }
}
