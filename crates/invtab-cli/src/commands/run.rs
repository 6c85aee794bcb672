//! Run command - extract a directory of invoices and store the combined table.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use invtab_core::{BatchAggregator, ErrorPolicy, list_documents, write_all};

use super::{LayoutArg, load_config};

/// Arguments for the run command.
#[derive(Args, Default)]
pub struct RunArgs {
    /// Directory containing invoice PDFs (default: data/raw)
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Directory for the CSV, XLSX and SQLite outputs (default: data/processed)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Skip documents that fail instead of aborting the run
    #[arg(long)]
    continue_on_error: bool,

    /// How header fields are located
    #[arg(long, value_enum)]
    layout: Option<LayoutArg>,
}

pub fn run(args: RunArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(dir) = args.input_dir {
        config.paths.input_dir = dir;
    }
    if let Some(dir) = args.output_dir {
        config.paths.output_dir = dir;
    }
    if args.continue_on_error {
        config.extraction.error_policy = ErrorPolicy::Skip;
    }
    if let Some(layout) = args.layout {
        config.extraction.layout = layout.into();
    }

    let input_dir = &config.paths.input_dir;
    let documents = list_documents(input_dir)
        .with_context(|| format!("Cannot read input directory {}", input_dir.display()))?;

    println!(
        "{} Found {} documents in {}",
        style("ℹ").blue(),
        documents.len(),
        input_dir.display()
    );

    let pb = ProgressBar::new(documents.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let aggregator = BatchAggregator::from_config(&config);
    let outcome = match aggregator.aggregate_documents(&documents, |_| pb.inc(1)) {
        Ok(outcome) => outcome,
        Err(e) => {
            pb.abandon();
            return Err(e).context("Extraction aborted; no output was written");
        }
    };
    pb.finish_and_clear();

    let report = write_all(&outcome.table, &config.paths.output_dir, &config.output)
        .context("Failed to store extracted data")?;

    debug!(
        "Wrote {}, {}, {}",
        report.csv_path.display(),
        report.xlsx_path.display(),
        report.sqlite_path.display()
    );

    println!(
        "{} Extracted {} rows from {} documents in {:?}",
        style("✓").green(),
        report.rows,
        outcome.processed,
        start.elapsed()
    );

    if !outcome.skipped.is_empty() {
        println!();
        println!("{}", style("Skipped files:").red());
        for skipped in &outcome.skipped {
            println!("  - {}", skipped.error);
        }
    }

    println!(
        "{} Data extraction, transformation, and storage complete.",
        style("✓").green()
    );

    Ok(())
}
