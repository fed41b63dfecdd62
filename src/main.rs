use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use bookmatch::config::{Config, ExportFormat};
use bookmatch::output::{export, terminal};
use bookmatch::pipeline;

/// Bookmatch: find the most similar pair of text files.
///
/// Cleans every .txt file in a directory, keeps each file's K most
/// frequent words (stopwords A, AND, AN, OF, IN, THE removed), and ranks
/// every pair of files by how many of those words they share.
#[derive(Parser)]
#[command(name = "bookmatch", version, about)]
struct Cli {
    /// Directory containing the .txt files to compare
    #[arg(long)]
    dir: PathBuf,

    /// How many top words to keep per file (default: 15, or BOOKMATCH_TOP_K)
    #[arg(long)]
    topk: Option<usize>,

    /// Export prefix, e.g. `results` -> results_topk.csv and results_pairs.csv
    #[arg(long)]
    export: Option<String>,

    /// Export format: csv or tsv (default: csv, or BOOKMATCH_FORMAT)
    #[arg(long)]
    format: Option<ExportFormat>,

    /// Print the full report as JSON instead of the human-readable summary
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Structured logging on stderr; stdout carries the report
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("bookmatch=info")),
        )
        .init();

    let cli = Cli::parse();

    let config = Config::load()?.with_overrides(cli.topk, cli.format)?;

    let report = pipeline::run(&cli.dir, &config, !cli.json)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        terminal::display_report(&report);
    }

    if let Some(prefix) = cli.export.as_deref().filter(|p| !p.is_empty()) {
        let paths = export::export(&report, prefix, config.format)?;
        if !cli.json {
            terminal::display_exported(&paths);
        }
    } else {
        info!("No export prefix given; skipping file export");
    }

    Ok(())
}
