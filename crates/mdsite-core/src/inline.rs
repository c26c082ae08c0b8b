//! Inline tokenizer.
//!
//! Text is tokenized by a fixed pipeline of passes ([`INLINE_PASSES`]).
//! Each pass only looks at the plain spans left by the passes before it, so
//! the order of the list decides how overlapping markers resolve: `**` must
//! run before `*`, and images before links.

use std::sync::LazyLock;

use memchr::memmem;
use regex::Regex;

use crate::error::{ParseError, Result};
use crate::node::{SpanKind, TextSpan};

/// `![alt](url)`
static IMAGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\[([^\[\]]*)\]\(([^\(\)]*)\)").expect("image pattern is valid")
});

/// `[text](url)`; the caller rejects matches preceded by `!`.
static LINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\[\]]*)\]\(([^\(\)]*)\)").expect("link pattern is valid")
});

/// One stage of the inline pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlinePass {
    /// Split plain text on `marker`; odd fragments become `kind`.
    Delimiter {
        marker: &'static str,
        kind: SpanKind,
    },
    /// Extract `![alt](url)` images.
    Images,
    /// Extract `[text](url)` links.
    Links,
}

/// Pass order. Changing it changes how `***text***` and `![..](..)` parse.
pub const INLINE_PASSES: [InlinePass; 6] = [
    InlinePass::Delimiter {
        marker: "**",
        kind: SpanKind::Bold,
    },
    InlinePass::Delimiter {
        marker: "*",
        kind: SpanKind::Italic,
    },
    InlinePass::Delimiter {
        marker: "_",
        kind: SpanKind::Italic,
    },
    InlinePass::Delimiter {
        marker: "`",
        kind: SpanKind::Code,
    },
    InlinePass::Images,
    InlinePass::Links,
];

/// Tokenize a run of inline text into typed spans.
///
/// The text is trimmed first. Empty input yields no spans. An unterminated
/// delimiter fails the whole call with `MalformedInline`.
///
/// ```rust
/// use mdsite_core::inline::tokenize;
/// use mdsite_core::SpanKind;
///
/// let spans = tokenize("a **b** c").unwrap();
/// let kinds: Vec<_> = spans.iter().map(|s| s.kind()).collect();
/// assert_eq!(kinds, [SpanKind::Plain, SpanKind::Bold, SpanKind::Plain]);
/// ```
pub fn tokenize(text: &str) -> Result<Vec<TextSpan>> {
    let text = text.trim();
    INLINE_PASSES
        .iter()
        .try_fold(vec![TextSpan::plain(text)], |spans, pass| pass.apply(spans))
}

impl InlinePass {
    /// Run this pass over `spans`. Non-plain spans are passed through.
    pub fn apply(self, spans: Vec<TextSpan>) -> Result<Vec<TextSpan>> {
        let mut out = Vec::with_capacity(spans.len() + 2);

        for span in spans {
            if !span.is_plain() {
                out.push(span);
                continue;
            }

            match self {
                InlinePass::Delimiter { marker, kind } => {
                    split_delimited(span.content(), marker, kind, &mut out)?
                }
                InlinePass::Images => {
                    split_pattern(span, &IMAGE_PATTERN, SpanKind::Image, &mut out)
                }
                InlinePass::Links => split_pattern(span, &LINK_PATTERN, SpanKind::Link, &mut out),
            }
        }

        Ok(out)
    }
}

fn split_delimited(
    text: &str,
    marker: &str,
    kind: SpanKind,
    out: &mut Vec<TextSpan>,
) -> Result<()> {
    let mut fragments = Vec::with_capacity(3);
    let mut start = 0;

    for pos in memmem::find_iter(text.as_bytes(), marker.as_bytes()) {
        fragments.push(&text[start..pos]);
        start = pos + marker.len();
    }
    fragments.push(&text[start..]);

    if fragments.len() % 2 == 0 {
        return Err(ParseError::malformed_inline(marker));
    }

    for (i, fragment) in fragments.into_iter().enumerate() {
        if fragment.is_empty() {
            continue;
        }
        if i % 2 == 0 {
            out.push(TextSpan::plain(fragment));
        } else {
            out.push(TextSpan::styled(fragment, kind));
        }
    }

    Ok(())
}

/// Split `span` around every `pattern` match, in match order.
///
/// Splits by match position, so repeated identical links or images in one
/// span each become their own piece instead of failing.
fn split_pattern(span: TextSpan, pattern: &Regex, kind: SpanKind, out: &mut Vec<TextSpan>) {
    let text = span.content();
    let mut pieces = Vec::new();
    let mut cursor = 0;
    let mut search_from = 0;

    while let Some(caps) = pattern.captures_at(text, search_from) {
        let Some(whole) = caps.get(0) else {
            break;
        };

        // `![..](..)` is an image, never a link.
        if kind == SpanKind::Link && text[..whole.start()].ends_with('!') {
            search_from = whole.start() + 1;
            continue;
        }

        let label = caps.get(1).map_or("", |m| m.as_str());
        let url = caps.get(2).map_or("", |m| m.as_str());

        if cursor < whole.start() {
            pieces.push(TextSpan::plain(&text[cursor..whole.start()]));
        }
        pieces.push(match kind {
            SpanKind::Image => TextSpan::image(label, url),
            _ => TextSpan::link(label, url),
        });

        cursor = whole.end();
        search_from = whole.end();
    }

    if pieces.is_empty() {
        out.push(span);
        return;
    }

    if cursor < text.len() {
        pieces.push(TextSpan::plain(&text[cursor..]));
    }
    out.extend(pieces);
}
