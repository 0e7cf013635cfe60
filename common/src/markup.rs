//! Inline markup in bot replies
//!
//! The chat backend formats replies with a small tag set: `p`, `strong`/`b`,
//! `em`/`i`, `ul`/`ol`/`li` and `br`. Replies are parsed into blocks of
//! styled spans and rendered for a terminal. Other tags are dropped and
//! their text kept. The source is the trusted backend, so nothing beyond
//! this tag-scoped styling is sanitized.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TAG: Regex = Regex::new(r"<(/?)([A-Za-z][A-Za-z0-9]*)[^>]*>").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

const BULLET: &str = "  • ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(Vec<Span>),
    ListItem(Vec<Span>),
}

impl Block {
    pub fn spans(&self) -> &[Span] {
        match self {
            Block::Paragraph(spans) | Block::ListItem(spans) => spans,
        }
    }

    pub fn plain_text(&self) -> String {
        self.spans().iter().map(|s| s.text.as_str()).collect()
    }
}

#[derive(Default)]
struct Builder {
    blocks: Vec<Block>,
    spans: Vec<Span>,
    in_item: bool,
    bold: usize,
    italic: usize,
}

impl Builder {
    fn text(&mut self, raw: &str) {
        let collapsed = WHITESPACE.replace_all(raw, " ");
        let decoded = decode_entities(&collapsed);

        let after_space = self
            .spans
            .last()
            .map_or(true, |s| s.text.ends_with(char::is_whitespace));
        let text = if after_space {
            decoded.trim_start().to_string()
        } else {
            decoded
        };

        if !text.is_empty() {
            self.spans.push(Span {
                text,
                bold: self.bold > 0,
                italic: self.italic > 0,
            });
        }
    }

    fn line_break(&mut self) {
        self.spans.push(Span {
            text: "\n".into(),
            bold: false,
            italic: false,
        });
    }

    fn flush(&mut self) {
        let mut spans = std::mem::take(&mut self.spans);
        trim_edges(&mut spans);
        if spans.is_empty() {
            return;
        }
        self.blocks.push(if self.in_item {
            Block::ListItem(spans)
        } else {
            Block::Paragraph(spans)
        });
    }

    fn tag(&mut self, name: &str, closing: bool) {
        match name.to_ascii_lowercase().as_str() {
            "p" | "div" => self.flush(),
            "strong" | "b" => {
                if closing {
                    self.bold = self.bold.saturating_sub(1);
                } else {
                    self.bold += 1;
                }
            }
            "em" | "i" => {
                if closing {
                    self.italic = self.italic.saturating_sub(1);
                } else {
                    self.italic += 1;
                }
            }
            "ul" | "ol" => {
                self.flush();
                self.in_item = false;
            }
            "li" => {
                self.flush();
                self.in_item = !closing;
            }
            "br" => self.line_break(),
            _ => {}
        }
    }
}

fn trim_edges(spans: &mut Vec<Span>) {
    while let Some(first) = spans.first_mut() {
        let trimmed = first.text.trim_start().to_string();
        if trimmed.is_empty() {
            spans.remove(0);
        } else {
            first.text = trimmed;
            break;
        }
    }
    while let Some(last) = spans.last_mut() {
        let trimmed = last.text.trim_end().to_string();
        if trimmed.is_empty() {
            spans.pop();
        } else {
            last.text = trimmed;
            break;
        }
    }
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Parse a reply into styled blocks.
///
/// # Examples
/// ```
/// use geogenie_common::markup::{parse_markup, Block};
///
/// let blocks = parse_markup("<p>Built in <strong>1591</strong></p>");
/// assert_eq!(blocks.len(), 1);
/// assert_eq!(blocks[0].plain_text(), "Built in 1591");
/// assert!(blocks[0].spans()[1].bold);
/// ```
pub fn parse_markup(source: &str) -> Vec<Block> {
    let mut builder = Builder::default();
    let mut cursor = 0;

    for caps in TAG.captures_iter(source) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(2)) else {
            continue;
        };
        builder.text(&source[cursor..whole.start()]);
        builder.tag(name.as_str(), !caps[1].is_empty());
        cursor = whole.end();
    }
    builder.text(&source[cursor..]);
    builder.flush();

    builder.blocks
}

/// Render blocks as plain text, one block per line.
pub fn render_plain(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(|block| match block {
            Block::Paragraph(_) => block.plain_text(),
            Block::ListItem(_) => format!("{}{}", BULLET, block.plain_text()),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render blocks with ANSI bold/italic escapes.
pub fn render_ansi(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(|block| {
            let body: String = block.spans().iter().map(ansi_span).collect();
            match block {
                Block::Paragraph(_) => body,
                Block::ListItem(_) => format!("{}{}", BULLET, body),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn ansi_span(span: &Span) -> String {
    let mut codes = Vec::new();
    if span.bold {
        codes.push("1");
    }
    if span.italic {
        codes.push("3");
    }
    if codes.is_empty() {
        span.text.clone()
    } else {
        format!("\x1b[{}m{}\x1b[0m", codes.join(";"), span.text)
    }
}
