//! Error types for pdfstitch.
//!
//! All fallible operations in the crate return [`Result`]. The error kinds
//! fall into four user-facing categories:
//!
//! - **Formula errors**: the deletion formula is malformed or names the same
//!   page twice. Detected before any merge work begins.
//! - **Index errors**: the formula references a file or page that the actual
//!   inputs do not have. Also detected eagerly; the whole merge is rejected
//!   rather than silently ignoring the entry.
//! - **I/O errors**: an input cannot be opened or the output cannot be
//!   written. Fatal for the current merge attempt.
//! - **Filter/render errors**: page rasterization failed or no renderer is
//!   available for the blank-page filter.

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfstitch operations.
pub type Result<T> = std::result::Result<T, PdfStitchError>;

/// Main error type for pdfstitch operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfStitchError {
    /// The deletion formula does not match the required grammar.
    #[error("Invalid deletion formula: {detail}\n  Formula: {formula}")]
    FormulaFormat {
        /// The offending formula (whitespace-stripped).
        formula: String,
        /// What exactly failed to parse.
        detail: String,
    },

    /// The same page of the same file is named for deletion more than once.
    #[error("Overlapping page deletions: page {page} of file {file_index} is named more than once")]
    FormulaOverlap {
        /// 1-based position of the file in the input list.
        file_index: usize,
        /// 1-based page number named twice.
        page: u32,
    },

    /// The formula references a file index beyond the input list.
    #[error("Deletion formula references file {file_index}, but only {file_count} file(s) were given")]
    UnknownFileIndex {
        /// 1-based file index from the formula.
        file_index: usize,
        /// Number of input files actually provided.
        file_count: usize,
    },

    /// A deletion entry's page index is out of range for the referenced file.
    #[error("Deletion formula names page {page} of {path}, but the file has only {total_pages} page(s)")]
    PageOutOfRange {
        /// Path to the referenced file.
        path: PathBuf,
        /// 1-based page number from the formula.
        page: u32,
        /// Actual page count of the file.
        total_pages: usize,
    },

    /// Input file was not found.
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Input path exists but is not a regular file.
    #[error("Not a file: {path}")]
    NotAFile {
        /// Path that is not a file.
        path: PathBuf,
    },

    /// Input file is not accessible (permission denied, etc.).
    #[error("Cannot access file: {path}\n  Reason: {source}")]
    FileNotAccessible {
        /// Path to the inaccessible file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to load a PDF file.
    #[error("Failed to load PDF: {path}\n  Reason: {reason}")]
    FailedToLoadPdf {
        /// Path to the PDF file.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// PDF file is corrupted or has invalid structure.
    #[error("Corrupted or invalid PDF: {path}\n  Details: {details}")]
    CorruptedPdf {
        /// Path to the corrupted PDF.
        path: PathBuf,
        /// Details about the corruption.
        details: String,
    },

    /// PDF file is encrypted and cannot be processed.
    #[error(
        "PDF is encrypted and cannot be processed: {path}\n  \
         Hint: Decrypt the PDF first using 'qpdf --decrypt' or similar tools"
    )]
    EncryptedPdf {
        /// Path to the encrypted PDF.
        path: PathBuf,
    },

    /// No files were provided for merging.
    #[error("No input files specified for merging")]
    NoFilesToMerge,

    /// Output file already exists and overwrite is not allowed.
    #[error(
        "Output file already exists: {path}\n  \
         Use --force to overwrite or choose a different output path"
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Failed to create the output file.
    #[error("Failed to create output file: {path}\n  Reason: {source}")]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to write to the output file.
    #[error("Failed to write to output file: {path}\n  Reason: {source}")]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Page rasterization failed during the blank-page filter.
    #[error("Failed to rasterize page {page} of {path}\n  Details: {detail}")]
    RenderFailed {
        /// Path to the PDF file.
        path: PathBuf,
        /// 1-based page number.
        page: u32,
        /// Details from the rendering backend.
        detail: String,
    },

    /// The blank-page filter was requested but no page renderer is available.
    #[error(
        "Blank-page filtering requires a page renderer\n  \
         Hint: rebuild with the 'render' feature enabled"
    )]
    RendererUnavailable,

    /// Merge operation failed.
    #[error("Merge operation failed: {reason}")]
    MergeFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// User cancelled the operation.
    #[error("Operation cancelled by user")]
    Cancelled,

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl From<lopdf::Error> for PdfStitchError {
    fn from(err: lopdf::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl From<anyhow::Error> for PdfStitchError {
    fn from(err: anyhow::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl PdfStitchError {
    /// Create a FormulaFormat error.
    pub fn formula_format(formula: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::FormulaFormat {
            formula: formula.into(),
            detail: detail.into(),
        }
    }

    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            path,
            reason: reason.into(),
        }
    }

    /// Create a CorruptedPdf error.
    pub fn corrupted_pdf(path: PathBuf, details: impl Into<String>) -> Self {
        Self::CorruptedPdf {
            path,
            details: details.into(),
        }
    }

    /// Create an EncryptedPdf error.
    pub fn encrypted_pdf(path: PathBuf) -> Self {
        Self::EncryptedPdf { path }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    /// Create a MergeFailed error.
    pub fn merge_failed(reason: impl Into<String>) -> Self {
        Self::MergeFailed {
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FormulaFormat { .. } => 1,
            Self::FormulaOverlap { .. } => 1,
            Self::UnknownFileIndex { .. } => 1,
            Self::PageOutOfRange { .. } => 1,
            Self::FileNotFound { .. } => 2,
            Self::NotAFile { .. } => 2,
            Self::FileNotAccessible { .. } => 2,
            Self::FailedToLoadPdf { .. } => 3,
            Self::CorruptedPdf { .. } => 3,
            Self::EncryptedPdf { .. } => 3,
            Self::NoFilesToMerge => 1,
            Self::OutputExists { .. } => 4,
            Self::FailedToCreateOutput { .. } => 5,
            Self::FailedToWrite { .. } => 5,
            Self::RenderFailed { .. } => 6,
            Self::RendererUnavailable => 1,
            Self::MergeFailed { .. } => 6,
            Self::InvalidConfig { .. } => 1,
            Self::Cancelled => 130, // Standard exit code for SIGINT
            Self::Io { .. } => 5,
            Self::Other { .. } => 1,
        }
    }
}
