//! Page-deletion formula parsing.
//!
//! A formula is a sequence of bracketed clauses, each naming one input file
//! (1-based position in the file list) and the pages to drop from it:
//!
//! ```text
//! [1:1,2,5-6,8,10,20-25]
//! [1:2,3,5-8][2:3,5-20]
//! ```
//!
//! Page specs are single 1-based page numbers or inclusive ranges. Whitespace
//! anywhere in the formula is ignored. The parser is strict: the clauses it
//! extracts must reproduce the whitespace-stripped input exactly, so trailing
//! garbage, unbracketed text, or malformed spec lists inside brackets are all
//! rejected rather than skipped. Naming the same page of the same file twice
//! (directly or through a range, in one clause or across clauses) is an
//! overlap error, not a silent dedup.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::error::{PdfStitchError, Result};

/// One bracketed clause: `[<digits>:<spec>(,<spec>)*]` with specs `n` or `a-b`.
static CLAUSE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(\d+):((?:\d+(?:-\d+)?,)*\d+(?:-\d+)?)\]").unwrap());

/// Most pages a single `a-b` range may name.
///
/// Ranges expand page-by-page before the formula is checked against real
/// page counts, so a typo like `[1:1-4000000000]` must be rejected up front
/// instead of expanded. Far beyond any real document.
const MAX_RANGE_PAGES: u32 = 100_000;

/// Validated mapping from zero-based file-list index to the zero-based page
/// indices to remove from that file.
///
/// Produced by [`parse`]; never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionMap {
    entries: BTreeMap<usize, BTreeSet<u32>>,
}

impl DeletionMap {
    /// True if no deletions were specified.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of files with at least one deletion entry.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Pages to delete from the file at the given zero-based list index.
    pub fn pages_for(&self, file_index: usize) -> Option<&BTreeSet<u32>> {
        self.entries.get(&file_index)
    }

    /// Total number of pages named for deletion across all files.
    pub fn deleted_page_count(&self) -> usize {
        self.entries.values().map(|pages| pages.len()).sum()
    }

    /// Iterate over `(zero-based file index, pages)` entries in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &BTreeSet<u32>)> {
        self.entries.iter().map(|(&idx, pages)| (idx, pages))
    }

    /// Check every entry against the actual input files.
    ///
    /// `files` is the ordered input list as `(path, page_count)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`PdfStitchError::UnknownFileIndex`] when an entry references
    /// a file beyond the input list, and [`PdfStitchError::PageOutOfRange`]
    /// when an entry names a page past the end of its file. The merge is
    /// rejected as a whole; a formula written against a mis-assumed page
    /// count must not quietly do nothing.
    pub fn validate_against(&self, files: &[(&Path, usize)]) -> Result<()> {
        for (&file_idx, pages) in &self.entries {
            let Some(&(path, page_count)) = files.get(file_idx) else {
                return Err(PdfStitchError::UnknownFileIndex {
                    file_index: file_idx + 1,
                    file_count: files.len(),
                });
            };

            // Sets are ordered, so only the largest page needs checking.
            if let Some(&max) = pages.iter().next_back()
                && max as usize >= page_count
            {
                return Err(PdfStitchError::PageOutOfRange {
                    path: path.to_path_buf(),
                    page: max + 1,
                    total_pages: page_count,
                });
            }
        }

        Ok(())
    }
}

/// Parse a deletion formula into a [`DeletionMap`].
///
/// An empty or whitespace-only formula is valid and deletes nothing.
///
/// # Errors
///
/// Returns [`PdfStitchError::FormulaFormat`] when the formula does not match
/// the clause grammar, contains leftover text between or around clauses, has
/// a descending or absurdly wide range, or uses a zero index (files and
/// pages are 1-based).
/// Returns [`PdfStitchError::FormulaOverlap`] when the same page of the same
/// file is named more than once.
///
/// # Examples
///
/// ```
/// use pdfstitch::formula::parse;
///
/// let map = parse("[1: 2, 3, 5-8][2: 3, 5-20]").unwrap();
/// assert_eq!(map.len(), 2);
/// assert!(map.pages_for(0).unwrap().contains(&1)); // page 2, zero-based
/// ```
pub fn parse(formula: &str) -> Result<DeletionMap> {
    let stripped: String = formula.chars().filter(|c| !c.is_whitespace()).collect();
    if stripped.is_empty() {
        return Ok(DeletionMap::default());
    }

    let mut reconstructed = String::with_capacity(stripped.len());
    let mut clauses = Vec::new();
    for caps in CLAUSE_RE.captures_iter(&stripped) {
        reconstructed.push_str(&caps[0]);
        clauses.push((caps[1].to_string(), caps[2].to_string()));
    }

    // Re-concatenating the matched clauses must reproduce the stripped input
    // byte-for-byte; anything left over is garbage the grammar did not cover.
    if clauses.is_empty() || reconstructed != stripped {
        return Err(PdfStitchError::formula_format(
            stripped,
            "expected clauses like [1:2,3,5-8]",
        ));
    }

    let mut entries: BTreeMap<usize, BTreeSet<u32>> = BTreeMap::new();

    for (index_str, specs) in clauses {
        let file_no: usize = index_str.parse().map_err(|_| {
            PdfStitchError::formula_format(
                stripped.clone(),
                format!("invalid file index: {index_str}"),
            )
        })?;
        if file_no == 0 {
            return Err(PdfStitchError::formula_format(
                stripped,
                "file indices are 1-based",
            ));
        }

        let pages = entries.entry(file_no - 1).or_default();

        for spec in specs.split(',') {
            let range = if let Some((start_str, end_str)) = spec.split_once('-') {
                let start = parse_page(start_str, &stripped)?;
                let end = parse_page(end_str, &stripped)?;
                if start > end {
                    return Err(PdfStitchError::formula_format(
                        stripped,
                        format!("invalid page range: {spec}"),
                    ));
                }
                if end - start >= MAX_RANGE_PAGES {
                    return Err(PdfStitchError::formula_format(
                        stripped,
                        format!("page range too large: {spec}"),
                    ));
                }
                start..=end
            } else {
                let page = parse_page(spec, &stripped)?;
                page..=page
            };

            for page in range {
                // Stored zero-based; reported 1-based.
                if !pages.insert(page - 1) {
                    return Err(PdfStitchError::FormulaOverlap {
                        file_index: file_no,
                        page,
                    });
                }
            }
        }
    }

    Ok(DeletionMap { entries })
}

fn parse_page(text: &str, formula: &str) -> Result<u32> {
    let page: u32 = text.parse().map_err(|_| {
        PdfStitchError::formula_format(formula.to_string(), format!("invalid page number: {text}"))
    })?;
    if page == 0 {
        return Err(PdfStitchError::formula_format(
            formula.to_string(),
            "page numbers are 1-based",
        ));
    }
    Ok(page)
}
