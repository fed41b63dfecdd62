// Set overlap metrics for top-K word sets.
//
// Two documents are compared only by which tokens appear in their top-K
// lists; counts and ranks are ignored. The Jaccard index is
//
//   |A ∩ B| / |A ∪ B|
//
// which is 0.0 for disjoint sets and 1.0 for identical ones.

use std::collections::BTreeSet;

use crate::text::topk::TopKEntry;

/// Collect the token set of a top-K list.
pub fn token_set(entries: &[TopKEntry]) -> BTreeSet<&str> {
    entries.iter().map(|e| e.token.as_str()).collect()
}

/// Tokens present in both sets, in ascending order.
pub fn common_words<'a>(a: &BTreeSet<&'a str>, b: &BTreeSet<&'a str>) -> Vec<&'a str> {
    a.intersection(b).copied().collect()
}

/// Jaccard index of two token sets. Two empty sets score 0.0.
pub fn jaccard_index(a: &BTreeSet<&str>, b: &BTreeSet<&str>) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;

    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}
