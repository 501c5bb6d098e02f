use tracing::debug;

use crate::block::{Block, List, Span};
use crate::config::Config;

/// Convert blocks to Typst markup
pub fn blocks_to_typst(blocks: &[Block], config: &Config) -> String {
    let mut out = String::new();

    emit_preamble(config, &mut out);

    if let Some(title) = &config.document.title {
        out.push_str("#align(center)[#text(size: 1.6em, weight: \"bold\")[");
        escape_into(title, &mut out);
        out.push_str("]]\n\n");
    }

    let mut i = 0;
    while i < blocks.len() {
        let block = &blocks[i];

        match block {
            Block::Heading { .. } if config.layout.keep_heading_with_next => {
                // Keep heading with following content using a block that prevents breaks
                out.push_str("#block(breakable: false)[\n");
                emit_heading(block, &mut out);

                // Include the next block if it exists (to keep heading with first content)
                if i + 1 < blocks.len() {
                    i += 1;
                    emit_block(&blocks[i], config, &mut out);
                }
                out.push_str("]\n\n");
            }
            _ => {
                emit_block(block, config, &mut out);
            }
        }

        i += 1;
    }

    debug!(blocks = blocks.len(), bytes = out.len(), "rendered typst");
    out
}

fn emit_preamble(config: &Config, out: &mut String) {
    out.push_str("#set page(paper: \"");
    escape_string_into(&config.page.paper, out);
    out.push('"');
    if config.page.numbers {
        out.push_str(", numbering: \"1\"");
    }
    out.push_str(")\n");

    out.push_str("#set text(size: ");
    out.push_str(&config.font.size);
    out.push_str(")\n");

    // Set up paragraph settings to prevent widows/orphans
    out.push_str("#set par(linebreaks: \"optimized\")\n\n");
}

fn emit_heading(block: &Block, out: &mut String) {
    if let Block::Heading { level, content } = block {
        for _ in 0..*level {
            out.push('=');
        }
        out.push(' ');
        spans_to_typst(content, out);
        out.push('\n');
        out.push('\n');
    }
}

fn emit_block(block: &Block, config: &Config, out: &mut String) {
    match block {
        Block::Heading { .. } => {
            emit_heading(block, out);
        }
        Block::Paragraph { content } => {
            spans_to_typst(content, out);
            out.push('\n');
            out.push('\n');
        }
        Block::List(list) => {
            // Wrap list to keep together when small, allow breaks when large
            if list.items.len() <= config.layout.list_keep_together {
                out.push_str("#block(breakable: false)[\n");
                list_to_typst(list, out);
                out.push_str("]\n\n");
            } else {
                list_to_typst(list, out);
                out.push('\n');
            }
        }
    }
}

fn spans_to_typst(spans: &[Span], out: &mut String) {
    for span in spans {
        match span {
            Span::Text(text) => escape_into(text, out),
            Span::Bold(text) => emphasis_to_typst("strong", text, out),
            Span::Italic(text) => emphasis_to_typst("emph", text, out),
        }
    }
}

/// Emit `#func[text];`. Function calls work inside words, where `*`/`_`
/// markup does not, and the `;` ends the call before any following `.` or `[`.
fn emphasis_to_typst(func: &str, text: &str, out: &mut String) {
    out.push('#');
    out.push_str(func);
    out.push('[');
    escape_into(text, out);
    out.push_str("];");
}

/// Escape characters that carry meaning in Typst markup.
fn escape_into(text: &str, out: &mut String) {
    // Digits seen so far, while the text still starts with digits only.
    // A leading `2023.` would otherwise become a numbered list item.
    let mut leading_digits = Some(0usize);

    for ch in text.chars() {
        match leading_digits {
            Some(n) if ch.is_ascii_digit() => leading_digits = Some(n + 1),
            Some(n) => {
                if n > 0 && ch == '.' {
                    out.push('\\');
                }
                leading_digits = None;
            }
            None => {}
        }

        match ch {
            '#' | '*' | '_' | '@' | '$' | '\\' | '`' | '<' | '>' | '[' | ']' | '=' | '+' | '-'
            | '/' | '~' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
}

/// Escape a value placed inside a Typst string literal.
fn escape_string_into(text: &str, out: &mut String) {
    for ch in text.chars() {
        if matches!(ch, '"' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
}

fn list_to_typst(list: &List, out: &mut String) {
    let prefix = if list.ordered { "+" } else { "-" };

    for item in &list.items {
        out.push_str(prefix);
        out.push(' ');
        spans_to_typst(item, out);
        out.push('\n');
    }
}
