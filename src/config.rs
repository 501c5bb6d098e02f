use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{Error, Result};

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub document: DocumentConfig,
    pub page: PageConfig,
    pub font: FontConfig,
    pub layout: LayoutConfig,
    pub html: HtmlConfig,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct DocumentConfig {
    /// Rendered as a top-level heading above the summary in Typst/PDF output.
    pub title: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PageConfig {
    pub paper: String,
    pub numbers: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            paper: "a4".to_string(),
            numbers: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct FontConfig {
    pub size: String,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            size: "11pt".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Keep each heading on the same page as the block after it.
    pub keep_heading_with_next: bool,
    /// Lists with at most this many items are never split across pages.
    pub list_keep_together: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            keep_heading_with_next: true,
            list_keep_together: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct HtmlConfig {
    /// Class of a `<div>` wrapped around the rendered summary.
    pub class: Option<String>,
}

impl Config {
    /// The bundled defaults from `default_config.toml`.
    pub fn compiled_default() -> Self {
        // build.rs rejects an unparsable default file
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file. Missing keys fall back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load config from a TOML file, or return the bundled defaults if the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Err(Error::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                Ok(Self::compiled_default())
            }
            other => other,
        }
    }
}
