// Bookmatch: word-frequency statistics and pairwise lexical similarity
// for a directory of text files.
//
// This is the library root. Each module corresponds to one stage of the
// analysis pipeline: files -> tokens -> counts -> top-K -> pairs -> export.

pub mod config;
pub mod corpus;
pub mod output;
pub mod pipeline;
pub mod similarity;
pub mod text;
