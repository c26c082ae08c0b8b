//! Block structure agreement with pulldown-cmark.
//!
//! For documents that stay inside the supported Markdown subset, the block
//! tree we build should have the same shape as the one a CommonMark parser
//! sees. Paragraphs nested in lists or quotes are not counted: CommonMark
//! wraps quote text in `<p>`, we do not.

use mdsite_core::{parse_document, HtmlNode};
use pretty_assertions::assert_eq;
use pulldown_cmark::{Event, Options, Parser as MdParser, Tag, TagEnd};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Counts {
    headings: u32,
    paragraphs: u32,
    lists: u32,
    list_items: u32,
    code_blocks: u32,
    quotes: u32,
}

fn count_nodes(root: &HtmlNode) -> Counts {
    let mut counts = Counts::default();
    for block in root.children() {
        match block.tag() {
            Some("h1" | "h2" | "h3" | "h4" | "h5" | "h6") => counts.headings += 1,
            Some("p") => counts.paragraphs += 1,
            Some("ul" | "ol") => {
                counts.lists += 1;
                counts.list_items += block.children().len() as u32;
            }
            Some("pre") => counts.code_blocks += 1,
            Some("blockquote") => counts.quotes += 1,
            other => panic!("unexpected block tag {other:?}"),
        }
    }
    counts
}

fn count_ours(input: &str) -> Counts {
    let root = parse_document(input).expect("document should parse");
    count_nodes(&root)
}

fn count_markdown(input: &str) -> Counts {
    let mut counts = Counts::default();
    let mut nesting = 0u32;

    for event in MdParser::new_ext(input, Options::empty()) {
        match event {
            Event::Start(tag) => match tag {
                Tag::Heading { .. } => counts.headings += 1,
                Tag::Paragraph => {
                    if nesting == 0 {
                        counts.paragraphs += 1;
                    }
                }
                Tag::List(_) => {
                    counts.lists += 1;
                    nesting += 1;
                }
                Tag::Item => counts.list_items += 1,
                Tag::CodeBlock(_) => counts.code_blocks += 1,
                Tag::BlockQuote { .. } => {
                    counts.quotes += 1;
                    nesting += 1;
                }
                _ => {}
            },
            Event::End(TagEnd::List(_)) | Event::End(TagEnd::BlockQuote { .. }) => {
                nesting = nesting.saturating_sub(1);
            }
            _ => {}
        }
    }
    counts
}

fn assert_agrees(input: &str, expected: Counts) {
    assert_eq!(count_ours(input), expected, "mdsite counts");
    assert_eq!(count_markdown(input), expected, "pulldown-cmark counts");
}

#[test]
fn test_agreement_article() {
    let input = "\
# Tolkien Fan Club

![JRR Tolkien sitting](/images/tolkien.png)

Here's the deal, **I like Tolkien**.

> All that is gold does not glitter,
> not all those who wander are lost.

## Reasons I like Tolkien

- You can spend years studying the legendarium
- It's [very good](/blog/majesty)

1. Gandalf
2. Bilbo
3. Sam

```
func main(){
    fmt.Println(\"Aiya, Ambar!\")
}
```
";

    assert_agrees(
        input,
        Counts {
            headings: 2,
            paragraphs: 2,
            lists: 2,
            list_items: 5,
            code_blocks: 1,
            quotes: 1,
        },
    );
}

#[test]
fn test_agreement_paragraphs_and_lists() {
    let input = "# A\n\npara one\nline two\n\n- x\n- y\n\nlast paragraph";

    assert_agrees(
        input,
        Counts {
            headings: 1,
            paragraphs: 2,
            lists: 1,
            list_items: 2,
            ..Counts::default()
        },
    );
}

#[test]
fn test_agreement_mixed_blocks() {
    let input = "1. a\n2. b\n\n```\ncode\n```\n\n## B\n\n> quoted _text_\n\n###### deep";

    assert_agrees(
        input,
        Counts {
            headings: 2,
            lists: 1,
            list_items: 2,
            code_blocks: 1,
            quotes: 1,
            ..Counts::default()
        },
    );
}
