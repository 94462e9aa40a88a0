//! PDF reading and loading operations.
//!
//! Inputs are loaded strictly in list order, one at a time: a merge is a
//! single sequential operation and the first failing file aborts it. Each
//! document is held only as long as the merge needs it.

use lopdf::Document;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::error::{PdfStitchError, Result};

/// A loaded PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,

    /// Time taken to load the document.
    pub load_time: Duration,

    /// File size in bytes.
    pub file_size: u64,
}

/// Statistics for a batch load operation.
#[derive(Debug, Clone)]
pub struct LoadStatistics {
    /// Number of PDFs loaded.
    pub file_count: usize,

    /// Total time taken for all loads.
    pub total_time: Duration,

    /// Total size of loaded files.
    pub total_size: u64,

    /// Total number of pages loaded.
    pub total_pages: usize,
}

impl LoadStatistics {
    fn from_loaded(loaded: &[LoadedPdf], total_time: Duration) -> Self {
        Self {
            file_count: loaded.len(),
            total_time,
            total_size: loaded.iter().map(|pdf| pdf.file_size).sum(),
            total_pages: loaded.iter().map(|pdf| pdf.page_count).sum(),
        }
    }
}

/// PDF reader with configurable loading behavior.
#[derive(Debug, Clone)]
pub struct PdfReader {
    /// Whether to verify PDF structure after loading.
    verify: bool,
}

impl PdfReader {
    /// Create a new PDF reader with default settings.
    pub fn new() -> Self {
        Self { verify: true }
    }

    /// Create a reader that skips verification (faster but less safe).
    pub fn without_verification() -> Self {
        Self { verify: false }
    }

    /// Load a single PDF document.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - File cannot be read
    /// - File is not a valid PDF
    /// - PDF is encrypted
    /// - PDF structure is corrupted
    pub fn load(&self, path: &Path) -> Result<LoadedPdf> {
        let path_buf = path.to_path_buf();
        let start = Instant::now();

        let document = Document::load(&path_buf).map_err(|e| {
            let err_msg = e.to_string();
            if err_msg.contains("encrypt") || err_msg.contains("password") {
                PdfStitchError::encrypted_pdf(path_buf.clone())
            } else {
                PdfStitchError::failed_to_load_pdf(path_buf.clone(), err_msg)
            }
        })?;

        let page_count = document.get_pages().len();
        if self.verify && page_count == 0 {
            return Err(PdfStitchError::corrupted_pdf(path_buf, "PDF has no pages"));
        }

        let load_time = start.elapsed();
        let file_size = std::fs::metadata(&path_buf).map(|m| m.len()).unwrap_or(0);

        debug!(
            "loaded {} ({} pages) in {:?}",
            path_buf.display(),
            page_count,
            load_time
        );

        Ok(LoadedPdf {
            document,
            path: path_buf,
            page_count,
            load_time,
            file_size,
        })
    }

    /// Load multiple PDF documents sequentially, in the order provided.
    ///
    /// # Errors
    ///
    /// Fails on the first file that cannot be loaded; files are not skipped.
    pub fn load_sequential(&self, paths: &[PathBuf]) -> Result<(Vec<LoadedPdf>, LoadStatistics)> {
        let start = Instant::now();

        let mut loaded = Vec::with_capacity(paths.len());
        for path in paths {
            loaded.push(self.load(path)?);
        }

        let stats = LoadStatistics::from_loaded(&loaded, start.elapsed());
        Ok((loaded, stats))
    }
}

impl Default for PdfReader {
    fn default() -> Self {
        Self::new()
    }
}
