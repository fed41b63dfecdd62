use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::Serialize;

/// Words excluded from all counting and normalization.
pub const STOPWORDS: &[&str] = &["A", "AND", "AN", "OF", "IN", "THE"];

/// Number of top words kept per document when nothing else is configured.
pub const DEFAULT_TOP_K: usize = 15;

/// Which delimited format the exporter writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Comma-separated with RFC 4180 quoting (default)
    #[default]
    Csv,
    /// Tab-separated; tabs and newlines inside cells become spaces
    Tsv,
}

impl ExportFormat {
    /// File extension used for `<prefix>_topk.<ext>` and `<prefix>_pairs.<ext>`.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "tsv" => Ok(ExportFormat::Tsv),
            other => anyhow::bail!("unknown export format {other:?} (expected csv or tsv)"),
        }
    }
}

/// Immutable analysis settings handed to every pipeline stage.
///
/// Defaults come from environment variables (a `.env` file is loaded at
/// startup via dotenvy); command-line flags override them in `main.rs`.
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// How many of each document's most frequent words to keep
    pub top_k: usize,
    /// Delimited format for exported tables
    pub format: ExportFormat,
    /// Fixed stopword list; tokens are compared after upper-casing
    pub stopwords: &'static [&'static str],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            format: ExportFormat::Csv,
            stopwords: STOPWORDS,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `BOOKMATCH_TOP_K` and `BOOKMATCH_FORMAT` are optional; a value that is
    /// set but malformed is an error rather than silently ignored.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("BOOKMATCH_TOP_K") {
            let top_k = raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("BOOKMATCH_TOP_K must be a positive integer, got {raw:?}"))?;
            config = config.with_top_k(top_k)?;
        }

        if let Some(raw) = lookup("BOOKMATCH_FORMAT") {
            config.format = raw.parse().context("invalid BOOKMATCH_FORMAT")?;
        }

        Ok(config)
    }

    /// Return a copy with a different K. Zero is rejected.
    pub fn with_top_k(mut self, top_k: usize) -> Result<Self> {
        if top_k == 0 {
            anyhow::bail!("top-K must be at least 1");
        }
        self.top_k = top_k;
        Ok(self)
    }

    /// Apply command-line values on top of this configuration. `None`
    /// keeps the current value; a K of zero is rejected like any other.
    pub fn with_overrides(
        mut self,
        top_k: Option<usize>,
        format: Option<ExportFormat>,
    ) -> Result<Self> {
        if let Some(top_k) = top_k {
            self = self.with_top_k(top_k)?;
        }
        if let Some(format) = format {
            self.format = format;
        }
        Ok(self)
    }

    /// Whether an upper-cased token is on the stopword list.
    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(&token)
    }
}
