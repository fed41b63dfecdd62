// Frequency counter: token occurrence counts and normalized frequencies.

use std::collections::HashMap;

/// Occurrence counts for one document's cleaned tokens.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyTable {
    /// Token -> number of occurrences
    pub counts: HashMap<String, usize>,
    /// Sum of all counts (the number of retained tokens)
    pub total: usize,
}

impl FrequencyTable {
    /// Count tokens. `total` always equals `tokens.len()`.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Self {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for token in tokens {
            *counts.entry(token.as_ref().to_string()).or_insert(0) += 1;
        }
        Self {
            counts,
            total: tokens.len(),
        }
    }

    /// True when nothing survived cleaning; such documents have no
    /// normalized frequencies and are left out of ranking.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of distinct tokens.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    pub fn count(&self, token: &str) -> usize {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// `count / total` for a token, or `None` if the document is empty.
    pub fn normalized(&self, token: &str) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        Some(self.count(token) as f64 / self.total as f64)
    }

    /// Normalized frequency for every token. Empty for an empty document.
    pub fn normalized_all(&self) -> HashMap<String, f64> {
        if self.is_empty() {
            return HashMap::new();
        }
        let total = self.total as f64;
        self.counts
            .iter()
            .map(|(token, &count)| (token.clone(), count as f64 / total))
            .collect()
    }
}
