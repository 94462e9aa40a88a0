//! pdfstitch - Merge PDF files into a single document.
//!
//! pdfstitch concatenates PDFs in the order given and cleans up the result
//! along the way: a page-deletion formula drops unwanted pages per input,
//! an optional blank-page filter discards near-white pages, and a scrubbing
//! pass removes failed-conversion marker pages from the merged output.
//!
//! # Examples
//!
//! ```no_run
//! use pdfstitch::config::{Config, FilterOptions, OverwriteMode};
//! use pdfstitch::io::PdfWriter;
//! use pdfstitch::merge::Merger;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     inputs: vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")],
//!     output: PathBuf::from("merged.pdf"),
//!     formula: "[1:1,10]".to_string(),
//!     filters: FilterOptions::default(),
//!     dry_run: false,
//!     verbose: false,
//!     quiet: false,
//!     overwrite_mode: OverwriteMode::Force,
//! };
//!
//! let merger = Merger::new();
//! let outcome = merger.merge(&config, None).await?;
//!
//! let writer = PdfWriter::new();
//! writer.save(&outcome.document, &config.output).await?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod filelist;
pub mod filter;
pub mod formula;
pub mod io;
pub mod merge;
pub mod output;
pub mod render;
pub mod utils;
pub mod validation;

pub use config::Config;
pub use error::{PdfStitchError, Result};
pub use filelist::FileList;
pub use formula::DeletionMap;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
