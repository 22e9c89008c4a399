use anyhow::{Context, Result};
use clap::Parser;
use std::fs;

use pdf_release::build_metadata;
use pdf_release::cli::Args;
use pdf_release::config::Settings;
use pdf_release::metadata::VersionDescriptor;
use pdf_release::pdf::{compress_pdf, embed_metadata, verify_metadata, VERIFY_FIELDS};

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::new()
        .filter_level(match args.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .init();

    let settings = Settings::from_args(&args);

    if !settings.input.exists() {
        anyhow::bail!("file not found: {}", settings.input.display());
    }

    // Project metadata sources are best-effort; a missing citation file or
    // version descriptor just means fewer fields get embedded.
    let citation_text = fs::read_to_string(settings.citation_path()).ok();
    if citation_text.is_none() {
        log::info!("No citation file at {}", settings.citation_path().display());
    }
    let version = VersionDescriptor::load(&settings.version_path());

    let metadata = build_metadata(citation_text.as_deref(), &version, &settings.overrides);
    log::debug!("Assembled {} metadata fields", metadata.len());

    println!("Processing PDF: {}", settings.input.display());
    println!("Quality: {:?}", settings.quality);
    println!();

    println!("Step 1: Compressing PDF...");
    let stats = compress_pdf(&settings.input, &settings.output, settings.quality)
        .with_context(|| "Failed to compress PDF")?;
    println!("  Original:   {:.2} MB", stats.original_mb());
    println!("  Compressed: {:.2} MB", stats.compressed_mb());
    println!("  Reduction:  {:.1}%", stats.reduction_pct());
    println!();

    println!("Step 2: Embedding metadata...");
    embed_metadata(&settings.output, &metadata).with_context(|| "Failed to embed metadata")?;
    println!("  Metadata embedded");
    println!();

    println!("Step 3: Verifying metadata...");
    match verify_metadata(&settings.output, VERIFY_FIELDS) {
        Some(report) => {
            println!("  Metadata verified");
            println!();
            println!("{report}");
        }
        None => println!("  Verification skipped (no metadata reader available)"),
    }

    println!();
    let final_bytes = fs::metadata(&settings.output)
        .with_context(|| format!("Failed to stat output file: {}", settings.output.display()))?
        .len();
    println!("Done: {}", settings.output.display());
    println!("  Final size: {:.2} MB", final_bytes as f64 / (1024.0 * 1024.0));

    Ok(())
}
