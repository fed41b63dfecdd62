// Delimited export of the top-K and pairwise tables.
//
// Two files are written next to each other:
//   <prefix>_topk.<ext>   document, rank, token, count, normalized_frequency
//   <prefix>_pairs.<ext>  document_a, document_b, common_count, jaccard
//
// CSV cells are quoted per RFC 4180 when they contain a comma, quote, or
// line break. TSV cells have tabs and line breaks replaced by spaces.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use super::fixed;
use crate::config::ExportFormat;
use crate::pipeline::AnalysisReport;

pub const TOPK_HEADER: [&str; 5] = ["document", "rank", "token", "count", "normalized_frequency"];
pub const PAIRS_HEADER: [&str; 4] = ["document_a", "document_b", "common_count", "jaccard"];

/// Locations of the two exported tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub topk: PathBuf,
    pub pairs: PathBuf,
}

impl ExportPaths {
    /// Derive both file names from a prefix, e.g. `out/results` ->
    /// `out/results_topk.csv` and `out/results_pairs.csv`.
    pub fn from_prefix(prefix: &str, format: ExportFormat) -> Self {
        let ext = format.extension();
        Self {
            topk: PathBuf::from(format!("{prefix}_topk.{ext}")),
            pairs: PathBuf::from(format!("{prefix}_pairs.{ext}")),
        }
    }
}

/// Write both tables. Any failure to create or write a file is returned
/// with the offending path attached.
pub fn export(report: &AnalysisReport, prefix: &str, format: ExportFormat) -> Result<ExportPaths> {
    let paths = ExportPaths::from_prefix(prefix, format);

    write_file(&paths.topk, |w| write_topk_table(w, report, format))?;
    write_file(&paths.pairs, |w| write_pairs_table(w, report, format))?;

    info!(
        topk = %paths.topk.display(),
        pairs = %paths.pairs.display(),
        rows = report.pairs.len(),
        "Exported tables"
    );
    Ok(paths)
}

fn write_file<F>(path: &Path, write_table: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    let file = File::create(path)
        .with_context(|| format!("Failed to create export file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_table(&mut writer).with_context(|| format!("Failed to write {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush {}", path.display()))?;
    Ok(())
}

/// Write the per-document top-K table, header first. Ranks start at 1.
pub fn write_topk_table<W: Write>(
    writer: &mut W,
    report: &AnalysisReport,
    format: ExportFormat,
) -> Result<()> {
    write_row(writer, &TOPK_HEADER, format)?;
    for doc in report.ranked_documents() {
        for (i, entry) in doc.top_k.iter().enumerate() {
            let rank = (i + 1).to_string();
            let count = entry.count.to_string();
            let freq = fixed(entry.normalized_frequency, 6);
            write_row(writer, &[&doc.name, &rank, &entry.token, &count, &freq], format)?;
        }
    }
    Ok(())
}

/// Write the pairwise table in ranking order, header first.
pub fn write_pairs_table<W: Write>(
    writer: &mut W,
    report: &AnalysisReport,
    format: ExportFormat,
) -> Result<()> {
    write_row(writer, &PAIRS_HEADER, format)?;
    for pair in &report.pairs {
        let common = pair.common_count.to_string();
        let jaccard = fixed(pair.jaccard, 4);
        write_row(
            writer,
            &[&pair.document_a, &pair.document_b, &common, &jaccard],
            format,
        )?;
    }
    Ok(())
}

fn write_row<W: Write>(writer: &mut W, cells: &[&str], format: ExportFormat) -> Result<()> {
    let delimiter = match format {
        ExportFormat::Csv => ",",
        ExportFormat::Tsv => "\t",
    };
    let line: Vec<String> = cells.iter().map(|c| escape_cell(c, format)).collect();
    writeln!(writer, "{}", line.join(delimiter))?;
    Ok(())
}

/// Make a cell safe for the target format.
pub fn escape_cell(cell: &str, format: ExportFormat) -> String {
    match format {
        ExportFormat::Csv => {
            if cell.contains([',', '"', '\n', '\r']) {
                format!("\"{}\"", cell.replace('"', "\"\""))
            } else {
                cell.to_string()
            }
        }
        ExportFormat::Tsv => cell.replace(['\t', '\n', '\r'], " "),
    }
}
