//! Configuration for a merge operation.
//!
//! This module transforms CLI arguments (or any other front end's input)
//! into a validated, normalized configuration that drives the merge. The
//! deletion formula is carried verbatim; it is parsed and validated
//! separately by [`crate::formula`] before any merge work begins.

use anyhow::{bail, Result};
use std::path::PathBuf;

/// Output file overwrite behavior.
///
/// The core overwrites unconditionally; obtaining confirmation is the
/// caller's duty, expressed through this mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Prompt the user before overwriting (default).
    #[default]
    Prompt,
    /// Always overwrite without prompting.
    Force,
    /// Never overwrite, error if file exists.
    NoClobber,
}

/// Which content-based page filters are active during a merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Drop pages whose rasterized content is almost entirely white.
    ///
    /// Selects the streaming merge strategy and requires a page renderer.
    pub drop_blank: bool,

    /// Scrub failed-conversion marker pages from the merged output.
    pub scrub_markers: bool,
}

impl FilterOptions {
    /// True if no content filter is active.
    pub fn is_empty(&self) -> bool {
        !self.drop_blank && !self.scrub_markers
    }
}

/// Complete configuration for a PDF merge operation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Input PDF file paths (in merge order).
    pub inputs: Vec<PathBuf>,

    /// Output PDF file path.
    pub output: PathBuf,

    /// Page-deletion formula, verbatim. May be empty.
    pub formula: String,

    /// Active content filters.
    pub filters: FilterOptions,

    /// Dry run mode - validate without creating output.
    pub dry_run: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,
}

impl Config {
    /// Returns a reference to inputs.
    pub fn inputs(&self) -> &[PathBuf] {
        self.inputs.as_ref()
    }

    /// Validate the configuration.
    ///
    /// Checks for logical inconsistencies and invalid combinations.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No input files are specified
    /// - Verbose and quiet modes are both enabled
    /// - The output path is also an input path
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            bail!("No input files specified");
        }

        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }

        for input in &self.inputs {
            if input == &self.output {
                bail!(
                    "Output file cannot be the same as an input file: {}",
                    self.output.display()
                );
            }
        }

        Ok(())
    }

    /// Check if output should be displayed.
    ///
    /// Returns false if in quiet mode and not doing a dry run.
    pub fn should_print(&self) -> bool {
        !self.quiet || self.dry_run
    }
}
