//! PDF writing and saving operations.
//!
//! Writes go through a temporary file in the destination directory followed
//! by an atomic rename, so an interrupted save never leaves a truncated
//! output behind.

use lopdf::Document;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;
use tracing::debug;

use crate::error::{PdfStitchError, Result};

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Time taken to write.
    pub write_time: Duration,

    /// Number of pages written.
    pub page_count: usize,

    /// Path where the file was written.
    pub output_path: PathBuf,
}

/// PDF writer for saving merged documents.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter;

impl PdfWriter {
    /// Create a new PDF writer.
    pub fn new() -> Self {
        Self
    }

    /// Save a PDF document to the specified path.
    ///
    /// # Errors
    ///
    /// Returns an error if the destination directory cannot be created or
    /// the document cannot be serialized or renamed into place.
    pub async fn save(&self, doc: &Document, path: &Path) -> Result<()> {
        let _stats = self.save_with_stats(doc, path).await?;
        Ok(())
    }

    /// Save a PDF document and return write statistics.
    ///
    /// The document is cloned into a blocking task, serialized to a
    /// temporary sibling file, and renamed into place once fully flushed.
    pub async fn save_with_stats(&self, doc: &Document, path: &Path) -> Result<WriteStatistics> {
        let path_buf = path.to_path_buf();

        if let Some(parent) = path_buf.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                PdfStitchError::FailedToCreateOutput {
                    path: path_buf.clone(),
                    source: e,
                }
            })?;
        }

        let page_count = doc.get_pages().len();

        // lopdf serialization is synchronous; keep it off the async runtime.
        let mut doc_clone = doc.clone();

        let stats = task::spawn_blocking(move || {
            let start = Instant::now();
            let temp_path = Self::temp_path_for(&path_buf);

            let result = (|| {
                let file = std::fs::File::create(&temp_path).map_err(|e| {
                    PdfStitchError::FailedToCreateOutput {
                        path: path_buf.clone(),
                        source: e,
                    }
                })?;

                let mut writer = std::io::BufWriter::new(file);
                doc_clone
                    .save_to(&mut writer)
                    .map_err(|e| PdfStitchError::FailedToWrite {
                        path: path_buf.clone(),
                        source: std::io::Error::other(e),
                    })?;
                writer.flush().map_err(|e| PdfStitchError::FailedToWrite {
                    path: path_buf.clone(),
                    source: e,
                })?;

                std::fs::rename(&temp_path, &path_buf).map_err(|e| {
                    PdfStitchError::FailedToWrite {
                        path: path_buf.clone(),
                        source: e,
                    }
                })
            })();

            if let Err(e) = result {
                let _ = std::fs::remove_file(&temp_path);
                return Err(e);
            }

            let file_size = std::fs::metadata(&path_buf).map(|m| m.len()).unwrap_or(0);

            Ok(WriteStatistics {
                file_size,
                write_time: start.elapsed(),
                page_count,
                output_path: path_buf,
            })
        })
        .await
        .map_err(|e| PdfStitchError::other(format!("Write task failed: {e}")))??;

        debug!(
            "wrote {} ({} bytes) in {:?}",
            stats.output_path.display(),
            stats.file_size,
            stats.write_time
        );

        Ok(stats)
    }

    /// Check whether the output path already exists.
    pub async fn exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(path).await.is_ok()
    }

    /// Check whether the output path is writable without writing the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory exists but is read-only.
    pub async fn can_write(&self, path: &Path) -> Result<()> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        if !parent.exists() {
            // Created at save time.
            return Ok(());
        }

        let metadata =
            tokio::fs::metadata(&parent)
                .await
                .map_err(|e| PdfStitchError::FileNotAccessible {
                    path: parent.clone(),
                    source: e,
                })?;

        if metadata.permissions().readonly() {
            return Err(PdfStitchError::invalid_config(format!(
                "Output directory is not writable: {}",
                parent.display()
            )));
        }

        Ok(())
    }

    fn temp_path_for(path: &Path) -> PathBuf {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output.pdf".to_string());
        path.with_file_name(format!(".{file_name}.tmp-{}", std::process::id()))
    }
}
