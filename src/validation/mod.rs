//! Input validation for pdfstitch.
//!
//! Validates PDF files and the merge configuration before any page is
//! touched:
//! - File existence and accessibility checks
//! - PDF format validation
//! - Encryption detection
//! - Page count verification
//! - Deletion formula cross-checks against actual page counts
//! - Output path validation

use lopdf::Document;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::{Config, OverwriteMode};
use crate::error::{PdfStitchError, Result};
use crate::formula;
use crate::utils::format_file_size;

/// Result of validating a single PDF file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Path to the validated file.
    pub path: PathBuf,

    /// Number of pages in the PDF.
    pub page_count: usize,

    /// PDF version (major, minor).
    pub version: Option<(u8, u8)>,

    /// Size of the file in bytes.
    pub file_size: u64,

    /// Number of objects in the PDF.
    pub object_count: usize,
}

impl ValidationResult {
    fn from_document(path: PathBuf, doc: &Document) -> Result<Self> {
        let page_count = doc.get_pages().len();

        let version = doc.version.split_once('.').map(|(major, minor)| {
            (
                major.parse::<u8>().unwrap_or_default(),
                minor.parse::<u8>().unwrap_or_default(),
            )
        });

        let object_count = doc.objects.len();
        let file_size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

        Ok(Self {
            path,
            page_count,
            version,
            file_size,
            object_count,
        })
    }
}

/// Summary of validation results for multiple files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    /// Individual validation results for each file, in input order.
    pub results: Vec<ValidationResult>,

    /// Total number of pages across all files.
    pub total_pages: usize,

    /// Total file size in bytes.
    pub total_size: u64,

    /// Pages the deletion formula will remove.
    pub pages_to_delete: usize,
}

impl ValidationSummary {
    /// Create a summary from validation results.
    pub fn from_results(results: Vec<ValidationResult>) -> Self {
        let total_pages = results.iter().map(|r| r.page_count).sum();
        let total_size = results.iter().map(|r| r.file_size).sum();

        Self {
            results,
            total_pages,
            total_size,
            pages_to_delete: 0,
        }
    }

    /// Format the total file size as a human-readable string.
    pub fn format_total_size(&self) -> String {
        format_file_size(self.total_size)
    }
}

/// Validator for PDF files and configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    /// Create a new validator.
    pub fn new() -> Self {
        Self
    }

    /// Validate a single PDF file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - File does not exist or is not a regular file
    /// - File is not accessible or is empty
    /// - File is not a valid PDF or is encrypted
    /// - PDF has no pages
    pub async fn validate_file(&self, path: &Path) -> Result<ValidationResult> {
        if !path.exists() {
            return Err(PdfStitchError::file_not_found(path.to_path_buf()));
        }

        if !path.is_file() {
            return Err(PdfStitchError::NotAFile {
                path: path.to_path_buf(),
            });
        }

        let metadata =
            tokio::fs::metadata(path)
                .await
                .map_err(|e| PdfStitchError::FileNotAccessible {
                    path: path.to_path_buf(),
                    source: e,
                })?;

        if metadata.len() == 0 {
            return Err(PdfStitchError::corrupted_pdf(
                path.to_path_buf(),
                "File is empty",
            ));
        }

        let doc = Document::load(path).map_err(|e| {
            let err_msg = e.to_string();
            if err_msg.contains("encrypt") || err_msg.contains("password") {
                PdfStitchError::encrypted_pdf(path.to_path_buf())
            } else {
                PdfStitchError::failed_to_load_pdf(path.to_path_buf(), err_msg)
            }
        })?;

        if doc.get_pages().is_empty() {
            return Err(PdfStitchError::corrupted_pdf(
                path.to_path_buf(),
                "PDF has no pages",
            ));
        }

        ValidationResult::from_document(path.to_path_buf(), &doc)
    }

    /// Validate multiple PDF files in input order.
    ///
    /// # Errors
    ///
    /// Fails on the first file that does not validate; files are never
    /// skipped, since dropping an input would silently shift the file
    /// indices the deletion formula refers to.
    pub async fn validate_files(&self, paths: &[PathBuf]) -> Result<ValidationSummary> {
        if paths.is_empty() {
            return Err(PdfStitchError::NoFilesToMerge);
        }

        let mut results = Vec::with_capacity(paths.len());
        for path in paths {
            results.push(self.validate_file(path).await?);
        }

        Ok(ValidationSummary::from_results(results))
    }

    /// Validate the output path against the overwrite mode.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Output file exists and the mode is no-clobber
    /// - Output directory exists but is not writable
    pub async fn validate_output(&self, config: &Config) -> Result<()> {
        let output_path = &config.output;

        if output_path.exists() {
            match config.overwrite_mode {
                OverwriteMode::NoClobber => {
                    return Err(PdfStitchError::output_exists(output_path.clone()));
                }
                // Prompting is handled by the caller.
                OverwriteMode::Prompt | OverwriteMode::Force => {}
            }
        }

        if let Some(parent) = output_path.parent()
            && !parent.as_os_str().is_empty()
            && parent.exists()
        {
            let metadata = tokio::fs::metadata(parent).await.map_err(|e| {
                PdfStitchError::FileNotAccessible {
                    path: parent.to_path_buf(),
                    source: e,
                }
            })?;

            if metadata.permissions().readonly() {
                return Err(PdfStitchError::invalid_config(format!(
                    "Output directory is not writable: {}",
                    parent.display()
                )));
            }
        }

        Ok(())
    }

    /// Validate the complete configuration.
    ///
    /// Checks every input file, the output path, and cross-checks the
    /// deletion formula against the actual file count and page counts.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation check fails.
    pub async fn validate_config(&self, config: &Config) -> Result<ValidationSummary> {
        let mut summary = self.validate_files(&config.inputs).await?;

        self.validate_output(config).await?;

        let deletions = formula::parse(&config.formula)?;
        let files: Vec<(&Path, usize)> = summary
            .results
            .iter()
            .map(|r| (r.path.as_path(), r.page_count))
            .collect();
        deletions.validate_against(&files)?;
        summary.pages_to_delete = deletions.deleted_page_count();

        Ok(summary)
    }
}
