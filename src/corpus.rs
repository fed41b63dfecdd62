// Corpus loading: find the .txt files in a directory and turn each one
// into an analyzed Document.
//
// Raw text only lives for the duration of `Document::analyze`; everything
// kept afterwards is derived from it.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::config::Config;
use crate::text::frequency::FrequencyTable;
use crate::text::tokenize::tokenize;
use crate::text::topk::{top_k, TopKEntry};

/// One input file after cleaning, counting and ranking.
#[derive(Debug, Clone)]
pub struct Document {
    /// File name without directory, used as the document identifier
    pub name: String,
    /// Cleaned tokens in order of appearance
    pub tokens: Vec<String>,
    pub frequencies: FrequencyTable,
    /// Up to K most frequent tokens, in rank order
    pub top_k: Vec<TopKEntry>,
}

impl Document {
    /// Run the per-document stages (tokenize, count, rank) over raw text.
    pub fn analyze(name: impl Into<String>, text: &str, config: &Config) -> Self {
        let tokens = tokenize(text, config);
        let frequencies = FrequencyTable::from_tokens(&tokens);
        let top_k = top_k(&frequencies, config.top_k);
        Self {
            name: name.into(),
            tokens,
            frequencies,
            top_k,
        }
    }

    /// Read and analyze a file. The document name is the file name.
    pub fn load(path: &Path, config: &Config) -> Result<Self> {
        let text = read_text(path)?;
        let name = document_name(path);
        let document = Self::analyze(name, &text, config);
        debug!(
            document = %document.name,
            tokens = document.total_tokens(),
            distinct = document.frequencies.distinct(),
            "Analyzed document"
        );
        Ok(document)
    }

    /// Number of retained tokens (stopwords excluded).
    pub fn total_tokens(&self) -> usize {
        self.frequencies.total
    }

    /// True when no tokens survived cleaning.
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}

/// List the `.txt` files directly inside `dir`, sorted by path.
///
/// The extension match is case-insensitive and only regular files count.
/// A missing or unreadable directory is an error naming the path.
pub fn list_text_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("{} is not a readable directory", dir.display());
    }

    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry =
            entry.with_context(|| format!("Failed to read an entry of {}", dir.display()))?;
        let path = entry.path();
        if path.is_file() && has_txt_extension(&path) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Read a file as text. Invalid UTF-8 bytes are dropped, so a stray byte
/// inside a word leaves the word whole instead of splitting it.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(decode_ignoring_invalid(&bytes))
}

/// Keep the valid UTF-8 runs of `bytes` and discard everything else.
pub fn decode_ignoring_invalid(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

/// File name used to identify a document in reports and exports.
pub fn document_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Whether the file name ends in `.txt`, ignoring case. A file named
/// just `.txt` counts.
fn has_txt_extension(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().to_ascii_lowercase())
        .is_some_and(|name| name.ends_with(".txt"))
}
