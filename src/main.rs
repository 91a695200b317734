//! sbomdiff: compare two SBOM files
//!
//! Parses two SBOM files (SPDX or `CycloneDX`) and reports the package-level
//! differences between them.

use anyhow::Result;
use clap::Parser;
use sbomdiff::pipeline::{exit_codes, write_output, OutputTarget};
use sbomdiff::{
    DiffEngine, DiffOptions, FormatDetector, ReportFormat, ReportGenerator, StandardHint,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sbomdiff")]
#[command(version)]
#[command(about = "Compare two SBOM files", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  No differences detected
    1  Differences detected
    2  Error occurred

EXAMPLES:
    # Diff two SPDX documents
    sbomdiff old.spdx.json new.spdx.json

    # Pin the standard and export JSON for processing
    sbomdiff --sbom cyclonedx old.json new.json -f json > diff.json

    # Ignore license changes
    sbomdiff old.spdx new.spdx --exclude-license")]
struct Cli {
    /// Path to the first (older) SBOM
    file1: PathBuf,

    /// Path to the second (newer) SBOM
    file2: PathBuf,

    /// SBOM standard of the input files
    #[arg(long, value_enum, default_value = "auto")]
    sbom: StandardHint,

    /// Exclude license comparison
    #[arg(long)]
    exclude_license: bool,

    /// Report format
    #[arg(short, long, value_enum, default_value = "text")]
    format: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output_file: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match run(&cli) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

fn run(cli: &Cli) -> Result<i32> {
    if cli.file1 == cli.file2 {
        anyhow::bail!("The SBOM files to compare must be different");
    }
    for path in [&cli.file1, &cli.file2] {
        if !path.is_file() {
            anyhow::bail!("SBOM file {} does not exist", path.display());
        }
    }

    let detector = FormatDetector::new();
    let (set1, standard1) = detector.detect_and_parse(&cli.file1, cli.sbom)?;
    let (set2, standard2) = detector.detect_and_parse(&cli.file2, cli.sbom)?;
    tracing::debug!(
        "{}: {} ({} packages)",
        cli.file1.display(),
        standard1,
        set1.len()
    );
    tracing::debug!(
        "{}: {} ({} packages)",
        cli.file2.display(),
        standard2,
        set2.len()
    );

    let engine = DiffEngine::with_options(DiffOptions {
        exclude_license: cli.exclude_license,
    });
    let result = engine.diff(&set1, &set2);

    let report = ReportGenerator::new(cli.format).generate(
        &result,
        &cli.file1.to_string_lossy(),
        &cli.file2.to_string_lossy(),
    )?;
    write_output(&report, &OutputTarget::from_option(cli.output_file.clone()))?;

    if result.has_differences() {
        Ok(exit_codes::DIFFERENCES_FOUND)
    } else {
        Ok(exit_codes::SUCCESS)
    }
}
