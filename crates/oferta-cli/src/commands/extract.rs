//! Extract command - filter products from a single inventory report.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::debug;

use oferta_core::models::config::OfertaConfig;
use oferta_core::models::record::Record;
use oferta_core::render::SummaryWriter;
use oferta_core::stock::{ExtractionReport, RecordExtractor};

use super::{load_config, resolve_input};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Inventory report, PDF or text export (default: today's DDMMYYYY.PDF)
    input: Option<PathBuf>,

    /// Keep products whose stock is strictly above this value
    #[arg(short, long, allow_negative_numbers = true)]
    minimum: Option<i64>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Summary file (default: from configuration)
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Do not write the summary file
    #[arg(long, conflicts_with = "summary")]
    no_summary: bool,

    /// Show line statistics and records to review
    #[arg(long)]
    show_stats: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(minimum) = args.minimum {
        config.extraction.minimum_quantity = minimum;
    }

    let input = resolve_input(args.input.clone())?;
    let report = extract_report(&input, &config)?;
    let minimum = config.extraction.minimum_quantity;

    if report.records.is_empty() {
        eprintln!(
            "{} No products found with stock > {}",
            style("⚠").yellow(),
            minimum
        );
    } else if !args.no_summary {
        let summary_path = args.summary.clone().unwrap_or_else(|| config.summary_path());
        SummaryWriter::new()
            .with_minimum(minimum)
            .write(&report.records, &summary_path)?;
        eprintln!(
            "{} Summary saved to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let output = format_records(&report.records, args.format, minimum)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        print!("{}", output);
    }

    if args.show_stats {
        print_stats(&report);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Run the extraction pipeline over a report file.
pub fn extract_report(input: &std::path::Path, config: &OfertaConfig) -> anyhow::Result<ExtractionReport> {
    let extractor = RecordExtractor::from_config(&config.extraction);
    let report = extractor.run_file(input, &config.pdf).map_err(|e| {
        anyhow::anyhow!("Could not process {}: {}", input.display(), e)
    })?;

    eprintln!(
        "{} {} products with stock > {} in {} pages",
        style("ℹ").blue(),
        report.records.len(),
        extractor.minimum_quantity(),
        report.pages
    );

    Ok(report)
}

fn format_records(records: &[Record], format: OutputFormat, minimum: i64) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(records)?)),
        OutputFormat::Csv => format_csv(records),
        OutputFormat::Text => Ok(SummaryWriter::new().with_minimum(minimum).render(records)),
    }
}

fn format_csv(records: &[Record]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "code",
        "serial",
        "description",
        "quantity",
        "unit",
        "location",
        "brand",
        "price",
    ])?;

    for record in records {
        wtr.write_record([
            record.code.as_str(),
            record.serial.as_str(),
            record.description.as_str(),
            &record.quantity.to_string(),
            record.unit.code(),
            record.location.as_str(),
            record.brand.as_str(),
            &record.price.to_string(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn print_stats(report: &ExtractionReport) {
    eprintln!();
    eprintln!("{} Pages:            {}", style("ℹ").blue(), report.pages);
    eprintln!("{} Noise lines:      {}", style("ℹ").blue(), report.noise_lines);
    eprintln!("{} Rejected lines:   {}", style("ℹ").blue(), report.rejected_lines);
    eprintln!("{} Below threshold:  {}", style("ℹ").blue(), report.below_threshold);
    eprintln!("{} Kept:             {}", style("ℹ").blue(), report.records.len());
    eprintln!("{} Processing time:  {}ms", style("ℹ").blue(), report.processing_time_ms);

    if !report.review.is_empty() {
        eprintln!();
        eprintln!(
            "{}",
            style("Location chosen by tie-break, check by hand:").yellow()
        );
        for item in &report.review {
            eprintln!(
                "  - page {} line {}: location {} / brand {}",
                item.page, item.line, item.record.location, item.record.brand
            );
        }
    }
}
