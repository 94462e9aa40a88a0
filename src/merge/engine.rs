//! Core merge implementation.
//!
//! Inputs are loaded sequentially and concatenated in list order. Two
//! strategies share the same assembly loop and differ only in how they
//! decide whether to keep a page:
//!
//! - the batch strategy keeps every page not named by the deletion formula;
//! - the streaming strategy additionally rasterizes each surviving page and
//!   drops it when it is almost entirely white.
//!
//! Marker-page scrubbing runs afterwards as a second pass over the
//! assembled document, so its page positions are positions in the output.

use lopdf::{Document, ObjectId};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{PdfStitchError, Result};
use crate::filter::is_blank_image;
use crate::formula::{self, DeletionMap};
use crate::io::{LoadedPdf, PdfReader};
use crate::merge::pagetree;
use crate::merge::scrub::scrub_marker_pages;
use crate::render::PageRenderer;
use crate::utils::format_file_size;

/// Statistics about a merge operation.
#[derive(Debug, Clone)]
pub struct MergeStatistics {
    /// Number of PDFs merged.
    pub files_merged: usize,

    /// Number of pages in the merged document.
    pub total_pages: usize,

    /// Pages removed by the deletion formula.
    pub pages_deleted: usize,

    /// Pages dropped by the blank-page filter.
    pub pages_filtered: usize,

    /// Marker pages scrubbed from the output.
    pub pages_scrubbed: usize,

    /// Total time taken for the merge.
    pub merge_time: Duration,

    /// Time taken to load all inputs.
    pub load_time: Duration,

    /// Total size of input files.
    pub input_size: u64,
}

impl MergeStatistics {
    /// Format input size as a human-readable string.
    pub fn format_input_size(&self) -> String {
        format_file_size(self.input_size)
    }
}

/// Result of a merge operation.
#[derive(Debug)]
pub struct MergeOutcome {
    /// The merged PDF document, ready to be written.
    pub document: Document,

    /// 1-based positions of scrubbed marker pages, relative to the
    /// assembled output before scrubbing.
    pub scrubbed_pages: Vec<u32>,

    /// Statistics about the merge.
    pub statistics: MergeStatistics,

    /// Paths of the files that were merged, in merge order.
    pub merged_files: Vec<PathBuf>,
}

/// PDF merger that combines multiple documents.
pub struct Merger {
    reader: PdfReader,
}

impl Merger {
    /// Create a new merger with default settings.
    pub fn new() -> Self {
        Self {
            reader: PdfReader::new(),
        }
    }

    /// Merge the configured inputs into a single document.
    ///
    /// `renderer` is required when the blank-page filter is active and
    /// unused otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The deletion formula is malformed or names unknown files or pages
    /// - An input cannot be loaded
    /// - The blank-page filter is requested without a renderer
    /// - Every page is removed, leaving nothing to write
    pub async fn merge(
        &self,
        config: &Config,
        renderer: Option<&dyn PageRenderer>,
    ) -> Result<MergeOutcome> {
        let merge_start = Instant::now();

        if config.inputs.is_empty() {
            return Err(PdfStitchError::NoFilesToMerge);
        }

        let deletions = formula::parse(&config.formula)?;

        if config.filters.drop_blank && renderer.is_none() {
            return Err(PdfStitchError::RendererUnavailable);
        }

        let load_start = Instant::now();
        let (loaded, load_stats) = self.reader.load_sequential(&config.inputs)?;
        let load_time = load_start.elapsed();

        // Every deletion target must exist before any page is touched.
        let files: Vec<(&std::path::Path, usize)> = loaded
            .iter()
            .map(|pdf| (pdf.path.as_path(), pdf.page_count))
            .collect();
        deletions.validate_against(&files)?;

        let merged_files: Vec<PathBuf> = loaded.iter().map(|pdf| pdf.path.clone()).collect();
        let input_size = loaded.iter().map(|pdf| pdf.file_size).sum();
        let files_merged = loaded.len();

        let assembly = self.assemble(loaded, &deletions, renderer, config)?;
        let mut document = assembly.document;

        let scrubbed_pages = if config.filters.scrub_markers {
            scrub_marker_pages(&mut document)?
        } else {
            Vec::new()
        };

        if document.get_pages().is_empty() {
            return Err(PdfStitchError::merge_failed(
                "All pages were removed; nothing to write",
            ));
        }

        document.prune_objects();
        document.compress();
        document.renumber_objects();

        let statistics = MergeStatistics {
            files_merged,
            total_pages: document.get_pages().len(),
            pages_deleted: assembly.pages_deleted,
            pages_filtered: assembly.pages_filtered,
            pages_scrubbed: scrubbed_pages.len(),
            merge_time: merge_start.elapsed(),
            load_time,
            input_size,
        };

        info!(
            "merged {} file(s) ({} pages, {} loaded) in {:?}",
            statistics.files_merged,
            statistics.total_pages,
            load_stats.total_pages,
            statistics.merge_time
        );

        Ok(MergeOutcome {
            document,
            scrubbed_pages,
            statistics,
            merged_files,
        })
    }

    /// Concatenate the loaded documents, keeping only surviving pages.
    fn assemble(
        &self,
        loaded: Vec<LoadedPdf>,
        deletions: &DeletionMap,
        renderer: Option<&dyn PageRenderer>,
        config: &Config,
    ) -> Result<Assembly> {
        let mut pages_deleted = 0usize;
        let mut pages_filtered = 0usize;

        let mut merged: Option<Document> = None;
        let mut max_id = 0;

        for (file_index, pdf) in loaded.into_iter().enumerate() {
            let mut doc = pdf.document;
            let is_base = merged.is_none();

            if !is_base {
                doc.renumber_objects_with(max_id + 1);
            }
            max_id = doc.max_id;

            let deleted_pages = deletions.pages_for(file_index);
            let pages = doc.get_pages();

            // Deleted pages are never rendered; the blank check only applies
            // to pages the formula keeps. One render session per file.
            let blank_pages: BTreeSet<u32> = if config.filters.drop_blank {
                let renderer = renderer.ok_or(PdfStitchError::RendererUnavailable)?;
                let candidates: Vec<usize> = pages
                    .keys()
                    .map(|&number| number - 1)
                    .filter(|index| !deleted_pages.is_some_and(|set| set.contains(index)))
                    .map(|index| index as usize)
                    .collect();
                let images = renderer.render_pages(&pdf.path, &candidates)?;
                candidates
                    .iter()
                    .zip(&images)
                    .filter(|(_, image)| is_blank_image(image))
                    .map(|(&index, _)| index as u32)
                    .collect()
            } else {
                BTreeSet::new()
            };

            let mut kept: Vec<ObjectId> = Vec::with_capacity(pdf.page_count);
            let mut dropped_any = false;

            for (page_number, page_id) in pages {
                let page_index = page_number - 1;

                if deleted_pages.is_some_and(|set| set.contains(&page_index)) {
                    pages_deleted += 1;
                    dropped_any = true;
                    continue;
                }

                if blank_pages.contains(&page_index) {
                    debug!(
                        "dropping blank page {} of {}",
                        page_number,
                        pdf.path.display()
                    );
                    pages_filtered += 1;
                    dropped_any = true;
                    continue;
                }

                kept.push(page_id);
            }

            match merged.as_mut() {
                None => {
                    if dropped_any {
                        pagetree::replace_page_tree(&mut doc, &kept)?;
                    }
                    merged = Some(doc);
                }
                Some(merged) => {
                    merged.objects.extend(doc.objects);
                    pagetree::append_pages(merged, &kept)?;
                }
            }
        }

        let document = merged.ok_or(PdfStitchError::NoFilesToMerge)?;

        Ok(Assembly {
            document,
            pages_deleted,
            pages_filtered,
        })
    }
}

impl Default for Merger {
    fn default() -> Self {
        Self::new()
    }
}

struct Assembly {
    document: Document,
    pages_deleted: usize,
    pages_filtered: usize,
}
