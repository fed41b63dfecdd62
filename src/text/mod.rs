// Per-document text statistics: cleaning, counting, and top-K ranking.

pub mod frequency;
pub mod tokenize;
pub mod topk;
