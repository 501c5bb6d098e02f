use std::sync::LazyLock;

use regex::Regex;

use crate::block::Span;

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold pattern is valid"));

// Opening and closing delimiters are not required to match.
static ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\*|_)(.+?)(?:\*|_)").expect("italic pattern is valid"));

/// Split one block's text into plain, bold and italic spans.
///
/// Each pass looks for a bold span anywhere in the remaining text and only
/// falls back to italic when no bold span is left, so an italic span that sits
/// before a bold one is swallowed into the preceding plain text. Unterminated
/// delimiters stay as literal text.
pub fn parse_inline(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut rest = text;

    loop {
        let (captures, is_bold) = if let Some(c) = BOLD.captures(rest) {
            (c, true)
        } else if let Some(c) = ITALIC.captures(rest) {
            (c, false)
        } else {
            break;
        };

        let Some(whole) = captures.get(0) else {
            break;
        };
        if whole.start() > 0 {
            spans.push(Span::Text(rest[..whole.start()].to_string()));
        }
        let inner = captures[1].to_string();
        spans.push(if is_bold {
            Span::Bold(inner)
        } else {
            Span::Italic(inner)
        });
        rest = &rest[whole.end()..];
    }

    if !rest.is_empty() {
        spans.push(Span::Text(rest.to_string()));
    }

    spans
}
