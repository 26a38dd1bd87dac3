//! Inline tokenizer.
//!
//! Text is split into [`Span`]s by a fixed sequence of passes over a growing
//! span list: `**`, `*`, `_`, `` ` ``, then images, then links. Each pass only
//! looks at plain spans, so anything claimed by an earlier pass is never
//! re-split. `**bold and *italic* inside**` therefore yields a single bold span
//! whose text still contains the inner asterisks.

use std::sync::LazyLock;

use regex::Regex;

use crate::block::Span;
use crate::error::FormatError;

static IMAGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^\)]*)\)").unwrap());

static LINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\(([^\)]*)\)").unwrap());

/// Split raw text into formatted spans.
///
/// Empty input yields no spans. An unmatched delimiter fails the whole call.
pub fn tokenize(text: &str) -> Result<Vec<Span>, FormatError> {
    let spans = vec![Span::Plain(text.to_owned())];
    let spans = split_delimiter(spans, "**", Span::Bold)?;
    let spans = split_delimiter(spans, "*", Span::Italic)?;
    let spans = split_delimiter(spans, "_", Span::Italic)?;
    let spans = split_delimiter(spans, "`", Span::Code)?;
    let spans = split_embedded(spans, find_image, |alt, url| Span::Image { alt, url });
    Ok(split_embedded(spans, find_link, |text, url| Span::Link {
        text,
        url,
    }))
}

/// Split every plain span on `delimiter`.
///
/// Parts at odd positions sit between a pair of delimiters and become
/// `wrap(part)`. Empty parts are dropped.
pub fn split_delimiter(
    spans: Vec<Span>,
    delimiter: &'static str,
    wrap: fn(String) -> Span,
) -> Result<Vec<Span>, FormatError> {
    let mut out = Vec::with_capacity(spans.len());

    for span in spans {
        let Span::Plain(text) = span else {
            out.push(span);
            continue;
        };

        let parts: Vec<&str> = text.split(delimiter).collect();
        if parts.len() % 2 == 0 {
            return Err(FormatError::UnterminatedDelimiter { delimiter });
        }

        for (i, part) in parts.into_iter().enumerate() {
            if part.is_empty() {
                continue;
            }
            if i % 2 == 0 {
                out.push(Span::Plain(part.to_owned()));
            } else {
                out.push(wrap(part.to_owned()));
            }
        }
    }

    Ok(out)
}

/// An image or link located inside a plain span.
#[derive(Debug, PartialEq, Eq)]
struct Embedded {
    start: usize,
    end: usize,
    text: String,
    url: String,
}

fn find_image(text: &str, from: usize) -> Option<Embedded> {
    let caps = IMAGE_PATTERN.captures_at(text, from)?;
    let whole = caps.get(0)?;
    Some(Embedded {
        start: whole.start(),
        end: whole.end(),
        text: caps[1].to_owned(),
        url: caps[2].to_owned(),
    })
}

fn find_link(text: &str, from: usize) -> Option<Embedded> {
    let mut pos = from;
    while let Some(caps) = LINK_PATTERN.captures_at(text, pos) {
        let whole = caps.get(0)?;
        // `![..](..)` is image syntax; retry from just past the bracket.
        if text[..whole.start()].ends_with('!') {
            pos = whole.start() + 1;
            continue;
        }
        return Some(Embedded {
            start: whole.start(),
            end: whole.end(),
            text: caps[1].to_owned(),
            url: caps[2].to_owned(),
        });
    }
    None
}

/// Pull every match of `find` out of the plain spans, left to right.
fn split_embedded(
    spans: Vec<Span>,
    find: fn(&str, usize) -> Option<Embedded>,
    make: fn(String, String) -> Span,
) -> Vec<Span> {
    let mut out = Vec::with_capacity(spans.len());

    for span in spans {
        let Span::Plain(text) = span else {
            out.push(span);
            continue;
        };

        let mut cursor = 0;
        while let Some(found) = find(&text, cursor) {
            if found.start > cursor {
                out.push(Span::Plain(text[cursor..found.start].to_owned()));
            }
            out.push(make(found.text, found.url));
            cursor = found.end;
        }

        if cursor == 0 {
            out.push(Span::Plain(text));
        } else if cursor < text.len() {
            out.push(Span::Plain(text[cursor..].to_owned()));
        }
    }

    out
}
