// Analysis pipeline: runs every stage in order over one directory.
//
//   files -> tokens -> counts -> top-K lists -> pairwise comparisons
//
// Documents are independent until the pairwise stage, which only starts
// once every top-K list has been computed. Export is left to the caller
// so the report can be printed, serialized, or written in any order.

use std::path::Path;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::Config;
use crate::corpus::{self, Document};
use crate::similarity::pairwise::{self, PairResult, TIE_BREAK_RULE};
use crate::text::topk::TopKEntry;

/// Per-document part of the report.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentSummary {
    pub name: String,
    /// Retained tokens after cleaning and stopword removal
    pub total_tokens: usize,
    pub distinct_tokens: usize,
    pub top_k: Vec<TopKEntry>,
}

impl From<&Document> for DocumentSummary {
    fn from(doc: &Document) -> Self {
        Self {
            name: doc.name.clone(),
            total_tokens: doc.total_tokens(),
            distinct_tokens: doc.frequencies.distinct(),
            top_k: doc.top_k.clone(),
        }
    }
}

/// Everything one run produces.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Settings the run used
    pub config: Config,
    /// Every analyzed document in filename order, empty ones included
    pub documents: Vec<DocumentSummary>,
    /// Documents with no tokens left after cleaning; excluded from ranking
    pub empty_documents: Vec<String>,
    /// Ranked pairs, most similar first
    pub pairs: Vec<PairResult>,
    pub tie_break_rule: &'static str,
}

impl AnalysisReport {
    /// The top-ranked pair, if at least two documents were non-empty.
    pub fn most_similar(&self) -> Option<&PairResult> {
        pairwise::most_similar(&self.pairs)
    }

    /// Documents that took part in ranking.
    pub fn ranked_documents(&self) -> impl Iterator<Item = &DocumentSummary> {
        self.documents.iter().filter(|d| d.total_tokens > 0)
    }
}

/// Build a report from already-analyzed documents.
pub fn summarize(documents: &[Document], config: &Config) -> AnalysisReport {
    let empty_documents: Vec<String> = documents
        .iter()
        .filter(|d| d.is_empty())
        .map(|d| d.name.clone())
        .collect();

    for name in &empty_documents {
        warn!(document = %name, "Document has no tokens after cleaning; excluded from ranking");
    }

    let pairs = pairwise::compare_all(documents);

    if let Some(best) = pairs.first() {
        info!(
            pairs = pairs.len(),
            document_a = %best.document_a,
            document_b = %best.document_b,
            common = best.common_count,
            jaccard = best.jaccard,
            "Ranked document pairs"
        );
    }

    AnalysisReport {
        config: config.clone(),
        documents: documents.iter().map(DocumentSummary::from).collect(),
        empty_documents,
        pairs,
        tie_break_rule: TIE_BREAK_RULE,
    }
}

/// Load every `.txt` file in `dir` and analyze the whole corpus.
///
/// Fails if the directory cannot be read, holds fewer than two `.txt`
/// files, or any file cannot be read.
pub fn run(dir: &Path, config: &Config, show_progress: bool) -> Result<AnalysisReport> {
    let files = corpus::list_text_files(dir)?;
    if files.len() < 2 {
        anyhow::bail!(
            "Found {} .txt file(s) in {}; at least 2 are needed to compare",
            files.len(),
            dir.display()
        );
    }

    info!(dir = %dir.display(), files = files.len(), top_k = config.top_k, "Analyzing corpus");

    let pb = if show_progress {
        ProgressBar::new(files.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Reading [{bar:30}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut documents = Vec::with_capacity(files.len());
    for path in &files {
        pb.set_message(corpus::document_name(path));
        documents.push(Document::load(path, config)?);
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok(summarize(&documents, config))
}
