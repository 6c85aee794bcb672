//! Extract command - pull the rows out of a single invoice file.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use console::style;
use tracing::info;

use invtab_core::invoice::rules::format_price;
use invtab_core::output::write_csv;
use invtab_core::{
    CombinedTable, DocumentLoader, InvoiceExtractor, InvoiceRecord, PdfDocumentLoader,
    TemplateInvoiceParser,
};

use super::{LayoutArg, load_config};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// How header fields are located
    #[arg(long, value_enum)]
    layout: Option<LayoutArg>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per line item
    Csv,
    /// Plain text summary
    Text,
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(layout) = args.layout {
        config.extraction.layout = layout.into();
    }

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let data = fs::read(&args.input)
        .with_context(|| format!("Cannot read {}", args.input.display()))?;
    let page = PdfDocumentLoader::new(config.pdf.clone())
        .first_page(&data)
        .with_context(|| format!("Cannot open {}", args.input.display()))?;
    let record = TemplateInvoiceParser::from_config(&config.extraction)
        .extract(&page)
        .with_context(|| format!("Malformed document {}", args.input.display()))?;

    let output = format_record(&record, args.format, &config.extraction.currency_symbol)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn format_record(record: &InvoiceRecord, format: OutputFormat, symbol: &str) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => {
            let mut buf = Vec::new();
            write_csv(&CombinedTable::from(record.rows()), &mut buf)?;
            Ok(String::from_utf8(buf)?)
        }
        OutputFormat::Text => Ok(format_text(record, symbol)),
    }
}

fn format_text(record: &InvoiceRecord, symbol: &str) -> String {
    let header = &record.header;
    let mut output = String::new();

    output.push_str(&format!("Invoice: {}\n", header.invoice_number));
    output.push_str(&format!("Date: {}\n", header.invoice_date));
    output.push_str(&format!("Due: {}\n", header.due_date));
    output.push('\n');

    output.push_str("Client:\n");
    output.push_str(&format!("  {}\n", header.client_name));
    output.push_str(&format!("  {}\n", header.client_address));
    output.push('\n');

    output.push_str("Items:\n");
    for item in &record.line_items {
        output.push_str(&format!(
            "  {:<30} {:>10} x {}\n",
            item.description,
            format_price(item.unit_price, symbol),
            item.quantity
        ));
    }

    output.push_str(&format!("\n{}\n", header.payment_terms));
    output
}
