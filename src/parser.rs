use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use crate::block::{Block, List};
use crate::inline::parse_inline;

static UNORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*]\s+").expect("unordered item pattern is valid"));

static ORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.\s+").expect("ordered item pattern is valid"));

/// Parse summary text into a list of blocks
pub fn parse(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut lists = ListAccumulator::default();
    let mut line_count = 0usize;

    for line in text.lines() {
        line_count += 1;
        match classify(line) {
            Line::Heading { level, content } => {
                blocks.extend(lists.flush());
                blocks.push(Block::Heading {
                    level,
                    content: parse_inline(content),
                });
            }
            Line::Item { kind, content } => {
                blocks.extend(lists.accept(kind, content));
            }
            Line::Blank => {
                blocks.extend(lists.flush());
            }
            Line::Paragraph(content) => {
                blocks.extend(lists.flush());
                blocks.push(Block::Paragraph {
                    content: parse_inline(content),
                });
            }
        }
    }
    blocks.extend(lists.flush());

    debug!(lines = line_count, blocks = blocks.len(), "parsed summary");
    blocks
}

#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Heading { level: u8, content: &'a str },
    Item { kind: ListKind, content: &'a str },
    Blank,
    Paragraph(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

/// Classify a single line; earlier rules win.
fn classify(line: &str) -> Line<'_> {
    if let Some(content) = line.strip_prefix("### ") {
        return Line::Heading { level: 3, content };
    }
    if let Some(content) = line.strip_prefix("## ") {
        return Line::Heading { level: 2, content };
    }
    if let Some(content) = line.strip_prefix("# ") {
        return Line::Heading { level: 1, content };
    }
    if let Some(marker) = UNORDERED_ITEM.find(line) {
        return Line::Item {
            kind: ListKind::Unordered,
            content: &line[marker.end()..],
        };
    }
    if let Some(marker) = ORDERED_ITEM.find(line) {
        return Line::Item {
            kind: ListKind::Ordered,
            content: &line[marker.end()..],
        };
    }
    if line.trim().is_empty() {
        return Line::Blank;
    }
    Line::Paragraph(line)
}

/// Collects consecutive list items of one kind until something ends the list.
#[derive(Default)]
struct ListAccumulator {
    kind: Option<ListKind>,
    items: Vec<String>,
}

impl ListAccumulator {
    /// Add an item. When the kind differs from the list being built, that
    /// list is finished and returned.
    fn accept(&mut self, kind: ListKind, item: &str) -> Option<Block> {
        let finished = if self.kind == Some(kind) {
            None
        } else {
            let finished = self.flush();
            self.kind = Some(kind);
            finished
        };
        self.items.push(item.to_string());
        finished
    }

    /// Finish the pending list, if any items were collected.
    fn flush(&mut self) -> Option<Block> {
        let kind = self.kind.take()?;
        let items = std::mem::take(&mut self.items);
        if items.is_empty() {
            return None;
        }
        trace!(items = items.len(), ?kind, "flushing list");
        Some(Block::List(List {
            ordered: kind == ListKind::Ordered,
            items: items.iter().map(|item| parse_inline(item)).collect(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Span;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn text(s: &str) -> Vec<Span> {
        vec![Span::Text(s.to_string())]
    }

    fn list(ordered: bool, items: &[&str]) -> Block {
        Block::List(List {
            ordered,
            items: items.iter().map(|item| text(item)).collect(),
        })
    }

    fn paragraph(s: &str) -> Block {
        Block::Paragraph { content: text(s) }
    }

    #[rstest]
    #[case("### Rent", Line::Heading { level: 3, content: "Rent" })]
    #[case("## Food", Line::Heading { level: 2, content: "Food" })]
    #[case("# March", Line::Heading { level: 1, content: "March" })]
    #[case("# ", Line::Heading { level: 1, content: "" })]
    #[case("#### Deep", Line::Paragraph("#### Deep"))]
    #[case("#NoSpace", Line::Paragraph("#NoSpace"))]
    #[case("- coffee", Line::Item { kind: ListKind::Unordered, content: "coffee" })]
    #[case("*   tabs", Line::Item { kind: ListKind::Unordered, content: "tabs" })]
    #[case("12.\tbills", Line::Item { kind: ListKind::Ordered, content: "bills" })]
    #[case("*italic* start", Line::Paragraph("*italic* start"))]
    #[case("---", Line::Paragraph("---"))]
    #[case("", Line::Blank)]
    #[case("   ", Line::Blank)]
    #[case("  - indented", Line::Paragraph("  - indented"))]
    fn classifies_lines(#[case] line: &str, #[case] expected: Line<'_>) {
        assert_eq!(classify(line), expected);
    }

    #[test]
    fn empty_input() {
        assert_eq!(parse(""), vec![]);
        assert_eq!(parse("\n\n  \n"), vec![]);
    }

    #[test]
    fn heading() {
        assert_eq!(
            parse("# Title"),
            vec![Block::Heading {
                level: 1,
                content: text("Title"),
            }]
        );
    }

    #[test]
    fn empty_heading() {
        assert_eq!(
            parse("## "),
            vec![Block::Heading {
                level: 2,
                content: vec![],
            }]
        );
    }

    #[test]
    fn list_then_paragraph() {
        assert_eq!(
            parse("- a\n- b\n\ntext"),
            vec![list(false, &["a", "b"]), paragraph("text")]
        );
    }

    #[test]
    fn ordered_list() {
        assert_eq!(parse("1. one\n2. two"), vec![list(true, &["one", "two"])]);
    }

    #[test]
    fn list_flushed_before_heading() {
        assert_eq!(
            parse("- item\n# Heading"),
            vec![
                list(false, &["item"]),
                Block::Heading {
                    level: 1,
                    content: text("Heading"),
                },
            ]
        );
    }

    #[test]
    fn list_flushed_before_paragraph() {
        assert_eq!(
            parse("1. first\nafterwards"),
            vec![list(true, &["first"]), paragraph("afterwards")]
        );
    }

    #[test]
    fn kind_change_starts_new_list() {
        assert_eq!(
            parse("- a\n* b\n1. c\n- d"),
            vec![
                list(false, &["a", "b"]),
                list(true, &["c"]),
                list(false, &["d"]),
            ]
        );
    }

    #[test]
    fn blank_line_splits_same_kind() {
        assert_eq!(
            parse("- a\n\n- b"),
            vec![list(false, &["a"]), list(false, &["b"])]
        );
    }

    #[test]
    fn each_line_is_its_own_paragraph() {
        assert_eq!(
            parse("first\nsecond"),
            vec![paragraph("first"), paragraph("second")]
        );
    }

    #[test]
    fn crlf_line_endings() {
        assert_eq!(
            parse("- a\r\n- b\r\n"),
            vec![list(false, &["a", "b"])]
        );
    }

    #[test]
    fn list_items_get_inline_formatting() {
        assert_eq!(
            parse("- **Dining**: $120"),
            vec![Block::List(List {
                ordered: false,
                items: vec![vec![
                    Span::Bold("Dining".to_string()),
                    Span::Text(": $120".to_string()),
                ]],
            })]
        );
    }

    #[test]
    fn accumulator_flush_without_items_is_empty() {
        let mut lists = ListAccumulator::default();
        assert_eq!(lists.flush(), None);
        assert_eq!(lists.accept(ListKind::Ordered, "x"), None);
        assert_eq!(lists.accept(ListKind::Ordered, "y"), None);
        assert_eq!(lists.flush(), Some(list(true, &["x", "y"])));
        assert_eq!(lists.flush(), None);
    }

    #[test]
    fn accumulator_returns_previous_list_on_kind_change() {
        let mut lists = ListAccumulator::default();
        lists.accept(ListKind::Unordered, "a");
        assert_eq!(
            lists.accept(ListKind::Ordered, "b"),
            Some(list(false, &["a"]))
        );
        assert_eq!(lists.flush(), Some(list(true, &["b"])));
    }
}
