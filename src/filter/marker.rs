//! Marker-text detection for failed-conversion placeholder pages.
//!
//! An upstream document-conversion pipeline substitutes a placeholder page
//! when it cannot convert a source file. Those pages all begin with the same
//! first line, so a prefix check on the extracted text is enough to scrub
//! them from a merged document.

/// First-line prefix identifying a failed-conversion placeholder page.
pub const MARKER_PREFIX: &str = "Could not convert the document ending with the document id";

/// True if the first line of the extracted page text carries the marker.
///
/// Pages with no extractable text are kept.
pub fn is_marker_text(text: &str) -> bool {
    text.lines()
        .next()
        .is_some_and(|first_line| first_line.starts_with(MARKER_PREFIX))
}
