use serde::Serialize;

/// Inline text spans with formatting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum Span {
    Text(String),
    Bold(String),
    Italic(String),
}

impl Span {
    /// The visible text of the span, without emphasis delimiters.
    pub fn text(&self) -> &str {
        match self {
            Span::Text(text) | Span::Bold(text) | Span::Italic(text) => text,
        }
    }
}

/// A list (ordered or unordered). Never built with zero items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct List {
    pub ordered: bool,
    pub items: Vec<Vec<Span>>,
}

/// Block-level elements of a summary, in render order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Heading {
        /// 1, 2 or 3
        level: u8,
        content: Vec<Span>,
    },
    Paragraph {
        content: Vec<Span>,
    },
    List(List),
}

/// Concatenate the visible text of every span, in document order.
pub fn plain_text(blocks: &[Block]) -> String {
    let mut out = String::new();
    for block in blocks {
        match block {
            Block::Heading { content, .. } | Block::Paragraph { content } => {
                out.extend(content.iter().map(Span::text));
            }
            Block::List(list) => {
                for item in &list.items {
                    out.extend(item.iter().map(Span::text));
                }
            }
        }
    }
    out
}
