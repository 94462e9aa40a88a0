//! pdfstitch - Merge PDF files into a single document.

use clap::Parser;
use std::process;
use tracing_subscriber::EnvFilter;

use pdfstitch::cli::Cli;
use pdfstitch::config::{Config, OverwriteMode};
use pdfstitch::error::PdfStitchError;
use pdfstitch::io::PdfWriter;
use pdfstitch::merge::Merger;
use pdfstitch::output::OutputFormatter;
use pdfstitch::render::PageRenderer;
use pdfstitch::validation::Validator;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Main application logic.
async fn run(cli: Cli) -> Result<(), PdfStitchError> {
    cli.validate()?;

    let config = cli.to_config()?;

    let formatter = OutputFormatter::from_config(&config);

    if formatter.should_print() {
        formatter.section(&format!("{} v{}", pdfstitch::NAME, pdfstitch::VERSION));
        formatter.blank_line();
    }

    formatter.info("Validating input files...");
    let validator = Validator::new();
    let validation_summary = validator.validate_config(&config).await?;

    if formatter.should_print() {
        formatter.display_validation_summary(&validation_summary);
        formatter.blank_line();
    }

    if !config.dry_run {
        handle_output_overwrite(&config, &formatter).await?;
    }

    if config.dry_run {
        formatter.blank_line();
        formatter.success("Dry run completed successfully");
        formatter.info(&format!("  Output would be: {}", config.output.display()));
        formatter.info("  Run without --dry-run to create the merged PDF");
        return Ok(());
    }

    formatter.info("Merging documents...");
    formatter.blank_line();

    let renderer = make_renderer(&config)?;
    let merger = Merger::new();
    let outcome = merger.merge(&config, renderer.as_deref()).await?;

    if !outcome.scrubbed_pages.is_empty() {
        formatter.warning(&format!(
            "Removed {} problematic page(s): {:?}",
            outcome.scrubbed_pages.len(),
            outcome.scrubbed_pages
        ));
    }

    if formatter.should_print() {
        formatter.info(&format!(
            "Merged {} file(s) into {} pages in {:.2}s",
            outcome.statistics.files_merged,
            outcome.statistics.total_pages,
            outcome.statistics.merge_time.as_secs_f64()
        ));
    }

    formatter.info(&format!("Writing to: {}", config.output.display()));

    let writer = PdfWriter::new();
    let write_stats = writer
        .save_with_stats(&outcome.document, &config.output)
        .await?;

    if formatter.should_print() {
        formatter.blank_line();
        formatter.success(&format!(
            "Successfully created {} ({})",
            config.output.display(),
            pdfstitch::utils::format_file_size(write_stats.file_size)
        ));

        if formatter.is_verbose() {
            formatter.blank_line();
            formatter.section("Statistics");
            formatter.detail("Input files", &outcome.statistics.files_merged.to_string());
            formatter.detail("Total pages", &outcome.statistics.total_pages.to_string());
            formatter.detail(
                "Pages deleted",
                &outcome.statistics.pages_deleted.to_string(),
            );
            formatter.detail(
                "Blank pages dropped",
                &outcome.statistics.pages_filtered.to_string(),
            );
            formatter.detail(
                "Marker pages scrubbed",
                &outcome.statistics.pages_scrubbed.to_string(),
            );
            formatter.detail("Input size", &outcome.statistics.format_input_size());
            formatter.detail(
                "Output size",
                &pdfstitch::utils::format_file_size(write_stats.file_size),
            );
            formatter.detail(
                "Load time",
                &format!("{:.2}s", outcome.statistics.load_time.as_secs_f64()),
            );
            formatter.detail(
                "Merge time",
                &format!("{:.2}s", outcome.statistics.merge_time.as_secs_f64()),
            );
            formatter.detail(
                "Write time",
                &format!("{:.2}s", write_stats.write_time.as_secs_f64()),
            );
        }
    }

    Ok(())
}

/// Build a page renderer when the blank-page filter needs one.
#[cfg(feature = "render")]
fn make_renderer(config: &Config) -> Result<Option<Box<dyn PageRenderer>>, PdfStitchError> {
    if config.filters.drop_blank {
        Ok(Some(Box::new(pdfstitch::render::PdfiumRenderer::new())))
    } else {
        Ok(None)
    }
}

#[cfg(not(feature = "render"))]
fn make_renderer(config: &Config) -> Result<Option<Box<dyn PageRenderer>>, PdfStitchError> {
    if config.filters.drop_blank {
        Err(PdfStitchError::RendererUnavailable)
    } else {
        Ok(None)
    }
}

/// Handle output file overwrite scenarios.
async fn handle_output_overwrite(
    config: &Config,
    formatter: &OutputFormatter,
) -> Result<(), PdfStitchError> {
    if !config.output.exists() {
        return Ok(());
    }

    match config.overwrite_mode {
        OverwriteMode::Force => Ok(()),
        OverwriteMode::NoClobber => Err(PdfStitchError::output_exists(config.output.clone())),
        OverwriteMode::Prompt => {
            if formatter.is_quiet() {
                // No terminal conversation in quiet mode.
                return Err(PdfStitchError::output_exists(config.output.clone()));
            }

            formatter.warning(&format!(
                "Output file already exists: {}",
                config.output.display()
            ));

            use std::io::{self, Write};
            print!("Overwrite? [y/N]: ");
            io::stdout().flush().ok();

            let mut response = String::new();
            io::stdin()
                .read_line(&mut response)
                .map_err(|err| PdfStitchError::other(format!("Failed to read input: {err}")))?;

            let response = response.trim().to_lowercase();
            if response == "y" || response == "yes" {
                Ok(())
            } else {
                Err(PdfStitchError::Cancelled)
            }
        }
    }
}
