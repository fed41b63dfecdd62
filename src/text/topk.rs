// Top-K ranker.
//
// Entries are ordered by count descending; equal counts are ordered by
// token ascending (byte order) so the ranking is a total order and the
// output is identical across runs.

use std::cmp::Ordering;

use serde::Serialize;

use super::frequency::FrequencyTable;

/// One row of a document's top-K table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopKEntry {
    pub token: String,
    pub count: usize,
    /// count / total retained tokens in the document
    pub normalized_frequency: f64,
}

/// Ordering used for top-K lists: count desc, then token asc.
pub fn rank_order(a: &TopKEntry, b: &TopKEntry) -> Ordering {
    b.count.cmp(&a.count).then_with(|| a.token.cmp(&b.token))
}

/// Select up to `k` most frequent tokens.
///
/// Returns all tokens when fewer than `k` are distinct, and nothing for
/// an empty table.
pub fn top_k(table: &FrequencyTable, k: usize) -> Vec<TopKEntry> {
    if table.is_empty() || k == 0 {
        return Vec::new();
    }

    let mut entries: Vec<TopKEntry> = table
        .counts
        .iter()
        .filter_map(|(token, &count)| {
            table.normalized(token).map(|normalized_frequency| TopKEntry {
                token: token.clone(),
                count,
                normalized_frequency,
            })
        })
        .collect();

    entries.sort_by(rank_order);
    entries.truncate(k);
    entries
}
