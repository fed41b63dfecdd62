// Human-readable run summary.
//
// Prints the files found, each document's word table, any empty-document
// warnings, the ranked pairs, and a closing line naming the most similar
// pair together with the ranking rule that picked it.

use colored::Colorize;

use super::export::ExportPaths;
use super::fixed;
use crate::pipeline::{AnalysisReport, DocumentSummary};
use crate::similarity::pairwise::PairResult;

/// Print the complete human-readable summary of a run.
pub fn display_report(report: &AnalysisReport) {
    display_file_list(report);
    for doc in &report.documents {
        display_document(doc, report.config.top_k);
    }
    display_empty_warnings(&report.empty_documents);
    display_pairs(&report.pairs);
    display_most_similar(report.most_similar(), report.tie_break_rule);
}

fn display_file_list(report: &AnalysisReport) {
    println!(
        "{}",
        format!("Found {} .txt files:", report.documents.len()).bold()
    );
    for doc in &report.documents {
        println!("  - {}", doc.name);
    }
    println!();
}

/// Print one document's top-K table.
pub fn display_document(doc: &DocumentSummary, top_k: usize) {
    println!("{}", format!("=== {} ===", doc.name).bold());
    println!(
        "  Total tokens (after cleaning & stopword removal): {}",
        doc.total_tokens
    );

    if doc.total_tokens == 0 {
        println!("  {}", "(empty: no words left to rank)".dimmed());
        println!();
        return;
    }

    println!("  Top-{} words ({} distinct):", top_k, doc.distinct_tokens);
    for (i, entry) in doc.top_k.iter().enumerate() {
        println!(
            "  {:>4}. {:>15}  COUNT={:<6} NORM_FREQ={}",
            i + 1,
            entry.token,
            entry.count,
            fixed(entry.normalized_frequency, 4)
        );
    }
    println!();
}

fn display_empty_warnings(empty: &[String]) {
    for name in empty {
        println!(
            "{} {} has no words after cleaning and was excluded from ranking",
            "Warning:".yellow(),
            name
        );
    }
    if !empty.is_empty() {
        println!();
    }
}

/// Print the ranked pair list.
pub fn display_pairs(pairs: &[PairResult]) {
    println!(
        "{}",
        "=== Pairwise similarity (by common top-K words, then Jaccard) ===".bold()
    );

    if pairs.is_empty() {
        println!("  {}", "No pairs to compare.".dimmed());
        println!();
        return;
    }

    for (i, pair) in pairs.iter().enumerate() {
        let line = format!(
            "{}  vs  {}  ->  COMMON={}, JACCARD={}",
            pair.document_a,
            pair.document_b,
            pair.common_count,
            fixed(pair.jaccard, 4)
        );
        if i == 0 {
            println!("  {:>4}. {}", i + 1, line.green());
        } else {
            println!("  {:>4}. {}", i + 1, line);
        }
    }
    println!();
}

fn display_most_similar(best: Option<&PairResult>, rule: &str) {
    match best {
        Some(pair) => {
            println!("{}", "Most similar pair (by this method):".bold());
            println!(
                "  -> {} and {} (COMMON={}, JACCARD={})",
                pair.document_a.bright_green(),
                pair.document_b.bright_green(),
                pair.common_count,
                fixed(pair.jaccard, 4)
            );
            if !pair.common_words.is_empty() {
                println!("     Shared words: {}", pair.common_words.join(", ").dimmed());
            }
        }
        None => {
            println!(
                "{}",
                "No most similar pair: fewer than two documents have words to compare.".yellow()
            );
        }
    }
    println!("  Ranking rule: {}", rule.dimmed());
}

/// Print where the exported tables were written.
pub fn display_exported(paths: &ExportPaths) {
    println!(
        "\nExported: {} and {}",
        paths.topk.display(),
        paths.pairs.display()
    );
}
