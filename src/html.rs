use html_escape::{encode_double_quoted_attribute, encode_text_to_string};
use tracing::debug;

use crate::block::{Block, List, Span};
use crate::config::Config;

/// Convert blocks to an HTML fragment
pub fn blocks_to_html(blocks: &[Block], config: &Config) -> String {
    let mut out = String::new();

    if let Some(class) = &config.html.class {
        out.push_str("<div class=\"");
        out.push_str(&encode_double_quoted_attribute(class));
        out.push_str("\">\n");
    }

    for block in blocks {
        match block {
            Block::Heading { level, content } => {
                out.push_str(&format!("<h{level}>"));
                spans_to_html(content, &mut out);
                out.push_str(&format!("</h{level}>\n"));
            }
            Block::Paragraph { content } => {
                out.push_str("<p>");
                spans_to_html(content, &mut out);
                out.push_str("</p>\n");
            }
            Block::List(list) => list_to_html(list, &mut out),
        }
    }

    if config.html.class.is_some() {
        out.push_str("</div>\n");
    }

    debug!(blocks = blocks.len(), bytes = out.len(), "rendered html");
    out
}

fn list_to_html(list: &List, out: &mut String) {
    let tag = if list.ordered { "ol" } else { "ul" };
    out.push_str(&format!("<{tag}>\n"));
    for item in &list.items {
        out.push_str("<li>");
        spans_to_html(item, out);
        out.push_str("</li>\n");
    }
    out.push_str(&format!("</{tag}>\n"));
}

fn spans_to_html(spans: &[Span], out: &mut String) {
    for span in spans {
        match span {
            Span::Text(text) => {
                encode_text_to_string(text, out);
            }
            Span::Bold(text) => {
                out.push_str("<strong>");
                encode_text_to_string(text, out);
                out.push_str("</strong>");
            }
            Span::Italic(text) => {
                out.push_str("<em>");
                encode_text_to_string(text, out);
                out.push_str("</em>");
            }
        }
    }
}
