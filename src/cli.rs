//! CLI argument parsing for pdfstitch.
//!
//! Defines the command-line interface using `clap` and converts parsed
//! arguments into a validated [`Config`].

use clap::Parser;
use std::path::PathBuf;

use crate::config::{Config, FilterOptions, OverwriteMode};
use crate::error::{PdfStitchError, Result};
use crate::filelist::FileList;
use crate::formula;
use crate::utils::collect_paths_for_patterns;

/// Merge PDF files into a single document.
///
/// pdfstitch concatenates PDFs in the order given, optionally deleting
/// pages by formula, dropping blank pages, and scrubbing failed-conversion
/// marker pages from the result.
#[derive(Parser, Debug)]
#[command(name = "pdfstitch")]
#[command(version)]
#[command(about = "Merge PDF files into a single document", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Input PDF files to merge (in order)
    ///
    /// Specify multiple files or use glob patterns.
    /// Files are merged in the order provided.
    ///
    /// Examples:
    ///   pdfstitch file1.pdf file2.pdf -o output.pdf
    ///   pdfstitch chapter*.pdf -o book.pdf
    #[arg(required = true, value_name = "FILE")]
    pub inputs: Vec<String>,

    /// Output PDF file path
    ///
    /// The merged PDF will be written to this location.
    /// Use --force to overwrite existing files without confirmation.
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Page-deletion formula
    ///
    /// Clauses of the form [FILE:PAGES] name pages to drop before merging.
    /// FILE is the 1-based position of the input on the command line;
    /// PAGES is a comma-separated list of 1-based page numbers and
    /// inclusive ranges. Whitespace is ignored.
    ///
    /// Examples:
    ///   -d "[1:1,10]"         # Drop pages 1 and 10 of the first input
    ///   -d "[1:2-5][3:1]"     # Drop pages 2-5 of input 1, page 1 of input 3
    #[arg(short = 'd', long = "delete-pages", value_name = "FORMULA", default_value = "")]
    pub delete_pages: String,

    /// Drop pages whose rendered content is almost entirely white
    ///
    /// Each surviving page is rasterized and discarded when more than 97%
    /// of its pixels are near-white. Requires a PDF renderer.
    #[arg(long)]
    pub drop_blank: bool,

    /// Keep failed-conversion marker pages
    ///
    /// By default, pages whose text starts with the failed-conversion
    /// marker are removed from the merged output. This flag disables
    /// that scrubbing pass.
    #[arg(long)]
    pub keep_markers: bool,

    /// Dry run - validate inputs and preview merge without creating output
    ///
    /// Validates that all input files exist and are readable PDFs and
    /// that the deletion formula matches them, then displays what the
    /// merge would do without creating the output file.
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Verbose output - show detailed information about each PDF
    #[arg(short, long)]
    pub verbose: bool,

    /// Force overwrite of existing output file without confirmation
    ///
    /// By default, pdfstitch will prompt before overwriting an existing
    /// file. Use this flag to skip the confirmation prompt.
    #[arg(short, long)]
    pub force: bool,

    /// Never overwrite existing output file
    ///
    /// If the output file already exists, exit with an error
    /// instead of prompting or overwriting.
    #[arg(long, conflicts_with = "force")]
    pub no_clobber: bool,

    /// Suppress all non-error output
    ///
    /// Only errors and warnings will be printed.
    /// Useful for scripts and automation.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Convert CLI arguments into a validated [`Config`].
    ///
    /// Expands glob patterns in the input list, resolves the overwrite
    /// mode, and validates the resulting configuration. The deletion
    /// formula is syntax-checked here; its file and page references are
    /// checked later against the actual documents.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A glob pattern is invalid or matches no files
    /// - The deletion formula is malformed
    /// - Configuration validation fails
    pub fn to_config(&self) -> Result<Config> {
        let inputs: FileList = collect_paths_for_patterns(&self.inputs)?
            .into_iter()
            .collect();

        formula::parse(&self.delete_pages)?;

        let overwrite_mode = if self.force {
            OverwriteMode::Force
        } else if self.no_clobber {
            OverwriteMode::NoClobber
        } else if self.quiet {
            // No terminal conversation in quiet mode.
            OverwriteMode::NoClobber
        } else {
            OverwriteMode::Prompt
        };

        let filters = FilterOptions {
            drop_blank: self.drop_blank,
            scrub_markers: !self.keep_markers,
        };

        let config = Config {
            inputs: inputs.into_inner(),
            output: self.output.clone(),
            formula: self.delete_pages.clone(),
            filters,
            dry_run: self.dry_run,
            verbose: self.verbose,
            quiet: self.quiet,
            overwrite_mode,
        };

        config.validate().map_err(|e| {
            PdfStitchError::invalid_config(format!("Configuration validation failed: {e}"))
        })?;

        Ok(config)
    }

    /// Validate CLI arguments before processing.
    ///
    /// Performs early validation that doesn't require file I/O.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation check fails.
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            return Err(PdfStitchError::invalid_config("No input files specified"));
        }

        formula::parse(&self.delete_pages)?;

        Ok(())
    }
}
