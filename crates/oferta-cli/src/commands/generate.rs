//! Generate command - extract, render the offer document and convert it.

use std::path::PathBuf;
use std::time::Instant;

use chrono::{Local, NaiveDate};
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use oferta_core::render::{Converter, OfferDocument, SummaryWriter};

use super::extract::extract_report;
use super::{load_config, resolve_input};

/// Arguments for the generate command.
#[derive(Args)]
pub struct GenerateArgs {
    /// Inventory report, PDF or text export (default: today's DDMMYYYY.PDF)
    input: Option<PathBuf>,

    /// Keep products whose stock is strictly above this value
    #[arg(short, long, allow_negative_numbers = true)]
    minimum: Option<i64>,

    /// Offer document template (default: from configuration)
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Directory for generated files (default: from configuration)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Validity date printed on the offer, DD/MM/YYYY (default: today)
    #[arg(long, value_parser = parse_date)]
    valid_until: Option<NaiveDate>,

    /// Stop after rendering the document
    #[arg(long)]
    no_convert: bool,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%d/%m/%Y")
        .map_err(|e| format!("expected DD/MM/YYYY: {}", e))
}

pub async fn run(args: GenerateArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(minimum) = args.minimum {
        config.extraction.minimum_quantity = minimum;
    }
    if let Some(output_dir) = &args.output_dir {
        config.output.output_dir = output_dir.clone();
    }
    if let Some(template) = &args.template {
        config.output.template = template.clone();
    }

    let input = resolve_input(args.input.clone())?;
    let steps = if args.no_convert { 2 } else { 3 };

    let pb = ProgressBar::new(steps);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")?
            .progress_chars("##-"),
    );

    // Step 1: extract products
    pb.set_message("Extracting products...");
    let report = extract_report(&input, &config)?;
    let minimum = config.extraction.minimum_quantity;

    if report.records.is_empty() {
        pb.abandon_with_message("No products found");
        anyhow::bail!("No products found with stock > {}", minimum);
    }

    let summary_path = SummaryWriter::new()
        .with_minimum(minimum)
        .write(&report.records, &config.summary_path())?;
    pb.inc(1);

    // Step 2: render the offer document
    pb.set_message("Rendering offer document...");
    let valid_until = args.valid_until.unwrap_or_else(|| Local::now().date_naive());
    let document_path = OfferDocument::new(valid_until)
        .with_template_file(&config.output.template)?
        .write(&report.records, &config.document_path())?;
    pb.inc(1);

    // Step 3: convert
    let converted = if args.no_convert {
        None
    } else {
        pb.set_message("Converting...");
        let output = Converter::from_config(&config.converter).convert(&document_path, None)?;
        pb.inc(1);
        Some(output)
    };

    pb.finish_with_message("Done");

    info!("Offer generated with {} products", report.records.len());
    println!(
        "{} Offer generated with {} products",
        style("✓").green(),
        report.records.len()
    );
    println!("   {}", summary_path.display());
    println!("   {}", document_path.display());
    if let Some(output) = converted {
        println!("   {}", output.display());
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
