//! Formatting for AI-generated monthly spending summaries.
//!
//! The summary service returns free text in a small markdown subset: `#`–`###`
//! headings, `-`/`*` and `1.` list items, `**bold**` and `*italic*`/`_italic_`.
//! [`parse`] turns any such text into [`Block`]s, and the `summary_to_*`
//! functions render it as HTML, Typst, PDF or JSON.

mod block;
mod config;
mod error;
mod html;
mod inline;
mod parser;
mod typst;

pub use block::{Block, List, Span, plain_text};
pub use config::{Config, DocumentConfig, FontConfig, HtmlConfig, LayoutConfig, PageConfig};
pub use error::{Error, Result};
pub use inline::parse_inline;

use tracing::debug;
use typst_as_lib::TypstEngine;
use typst_as_lib::typst_kit_options::TypstKitFontOptions;
use typst_pdf::PdfOptions;

/// Parse summary text into a vector of blocks. Never fails.
pub fn parse(text: &str) -> Vec<Block> {
    parser::parse(text)
}

/// Render blocks as an HTML fragment.
pub fn to_html(blocks: &[Block], config: &Config) -> String {
    html::blocks_to_html(blocks, config)
}

/// Render blocks as Typst markup.
pub fn to_typst(blocks: &[Block], config: &Config) -> String {
    typst::blocks_to_typst(blocks, config)
}

/// Serialize blocks as JSON.
pub fn to_json(blocks: &[Block], pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(blocks)?
    } else {
        serde_json::to_string(blocks)?
    };
    Ok(json)
}

/// Compile blocks to PDF bytes.
pub fn to_pdf(blocks: &[Block], config: &Config) -> Result<Vec<u8>> {
    use typst_library::layout::PagedDocument;

    let typst_content = to_typst(blocks, config);

    let font_options = TypstKitFontOptions::new()
        .include_embedded_fonts(true)
        .include_system_fonts(false);

    let engine = TypstEngine::builder()
        .main_file(typst_content)
        .search_fonts_with(font_options)
        .build();

    let doc: PagedDocument = engine
        .compile()
        .output
        .map_err(|e| Error::Compile(format!("{:?}", e)))?;

    let bytes =
        typst_pdf::pdf(&doc, &PdfOptions::default()).map_err(|e| Error::Pdf(format!("{:?}", e)))?;
    debug!(pages = doc.pages.len(), bytes = bytes.len(), "compiled pdf");
    Ok(bytes)
}

/// Convert summary text to an HTML fragment.
pub fn summary_to_html(text: &str, config: &Config) -> String {
    to_html(&parse(text), config)
}

/// Convert summary text to Typst markup.
pub fn summary_to_typst(text: &str, config: &Config) -> String {
    to_typst(&parse(text), config)
}

/// Convert summary text to a JSON block tree.
pub fn summary_to_json(text: &str, pretty: bool) -> Result<String> {
    to_json(&parse(text), pretty)
}

/// Convert summary text to PDF bytes.
pub fn summary_to_pdf(text: &str, config: &Config) -> Result<Vec<u8>> {
    to_pdf(&parse(text), config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_compiles_with_default_config() {
        let text = "# March\n**Rent** was _high_.\n- 2023.\n1. un**believ**able";
        let bytes = summary_to_pdf(text, &Config::compiled_default()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn pdf_reports_bad_font_size() {
        let mut config = Config::compiled_default();
        config.font.size = "huge".to_string();
        assert!(matches!(
            summary_to_pdf("Hi", &config),
            Err(Error::Compile(_))
        ));
    }
}
