use std::path::{Path, PathBuf};

use anyhow::Context;
use lore_book::DEFAULT_INDENT;
use lore_diff::{DiffAlgorithm, DiffOptions};
use serde::Deserialize;

use crate::cli::OutputFormat;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "lorediff.toml";

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub diff: DiffSection,
    pub output: OutputSection,
    pub json: JsonSection,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DiffSection {
    pub algorithm: DiffAlgorithm,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub format: OutputFormat,
    pub color: bool,
    /// Unchanged lines kept around each change in text output; all when unset.
    pub context: Option<usize>,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            color: true,
            context: None,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct JsonSection {
    pub indent: usize,
}

impl Default for JsonSection {
    fn default() -> Self {
        Self { indent: DEFAULT_INDENT }
    }
}

impl CliConfig {
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("invalid configuration")
    }

    /// Load `explicit`, else `lorediff.toml` if it exists, else defaults.
    ///
    /// A missing explicit path is an error; a missing default file is not.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !fallback.exists() {
                    return Ok(Self::default());
                }
                fallback
            }
        };
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("in {}", path.display()))
    }

    pub fn diff_options(&self) -> DiffOptions {
        DiffOptions::with_algorithm(self.diff.algorithm)
    }
}
