// Pairwise similarity: top-K set overlap and the ranking of document pairs.

pub mod jaccard;
pub mod pairwise;
