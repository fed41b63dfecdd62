// Pairwise similarity engine.
//
// Every unordered pair of non-empty documents is compared by the overlap
// of their top-K token sets. Pairs are ranked by common-word count, then
// Jaccard index, then document names, so the first pair is the most
// similar one and the whole ranking is reproducible.

use std::cmp::Ordering;

use serde::Serialize;

use super::jaccard::{common_words, jaccard_index, token_set};
use crate::corpus::Document;
use crate::text::topk::TopKEntry;

/// Human-readable statement of the pair ranking order.
pub const TIE_BREAK_RULE: &str =
    "most common top-K words first; ties broken by higher Jaccard index, then by document names (A, then B) ascending";

/// Comparison of two documents' top-K sets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairResult {
    /// Lexically smaller document name
    pub document_a: String,
    pub document_b: String,
    /// |topK(A) ∩ topK(B)|
    pub common_count: usize,
    /// |topK(A) ∩ topK(B)| / |topK(A) ∪ topK(B)|
    pub jaccard: f64,
    /// The shared tokens, ascending
    pub common_words: Vec<String>,
}

/// Compare two named top-K lists.
///
/// The result is symmetric: swapping the arguments yields the same pair
/// because names are stored in ascending order.
pub fn compare(name_a: &str, top_a: &[TopKEntry], name_b: &str, top_b: &[TopKEntry]) -> PairResult {
    let set_a = token_set(top_a);
    let set_b = token_set(top_b);
    let common: Vec<String> = common_words(&set_a, &set_b)
        .into_iter()
        .map(str::to_string)
        .collect();

    let (document_a, document_b) = if name_a <= name_b {
        (name_a.to_string(), name_b.to_string())
    } else {
        (name_b.to_string(), name_a.to_string())
    };

    PairResult {
        document_a,
        document_b,
        common_count: common.len(),
        jaccard: jaccard_index(&set_a, &set_b),
        common_words: common,
    }
}

/// Ranking order for pairs: common count desc, Jaccard desc, names asc.
pub fn pair_order(a: &PairResult, b: &PairResult) -> Ordering {
    b.common_count
        .cmp(&a.common_count)
        .then_with(|| b.jaccard.partial_cmp(&a.jaccard).unwrap_or(Ordering::Equal))
        .then_with(|| a.document_a.cmp(&b.document_a))
        .then_with(|| a.document_b.cmp(&b.document_b))
}

/// Compare every unordered pair of non-empty documents and rank the results.
///
/// Empty documents are skipped; with fewer than two non-empty documents
/// the result is empty.
pub fn compare_all(documents: &[Document]) -> Vec<PairResult> {
    let ranked: Vec<&Document> = documents.iter().filter(|d| !d.is_empty()).collect();

    let mut pairs = Vec::with_capacity(ranked.len() * ranked.len().saturating_sub(1) / 2);
    for (i, a) in ranked.iter().enumerate() {
        for b in &ranked[i + 1..] {
            pairs.push(compare(&a.name, &a.top_k, &b.name, &b.top_k));
        }
    }

    pairs.sort_by(pair_order);
    pairs
}

/// The top of the ranking, if any pair exists.
pub fn most_similar(pairs: &[PairResult]) -> Option<&PairResult> {
    pairs.first()
}
