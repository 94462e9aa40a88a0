//! Marker-page scrubbing.
//!
//! Runs as a second pass over the assembled document: every page whose
//! extracted text starts with the failed-conversion marker is removed from
//! the page tree and its objects pruned.

use lopdf::{Document, ObjectId};
use tracing::debug;

use crate::error::Result;
use crate::filter::is_marker_text;
use crate::merge::pagetree::replace_page_tree;

/// Remove failed-conversion marker pages from `doc`.
///
/// Returns the 1-based positions (within `doc` before scrubbing) of the
/// pages that were removed, in ascending order, so callers can report them.
/// Pages whose text cannot be extracted are kept.
pub fn scrub_marker_pages(doc: &mut Document) -> Result<Vec<u32>> {
    let pages = doc.get_pages();

    let mut removed: Vec<u32> = Vec::new();
    let mut survivors: Vec<ObjectId> = Vec::with_capacity(pages.len());

    for (&number, &id) in &pages {
        let text = doc.extract_text(&[number]).unwrap_or_default();
        if is_marker_text(&text) {
            removed.push(number);
        } else {
            survivors.push(id);
        }
    }

    if !removed.is_empty() {
        replace_page_tree(doc, &survivors)?;
        doc.prune_objects();
        debug!("scrubbed {} marker page(s): {:?}", removed.len(), removed);
    }

    Ok(removed)
}
