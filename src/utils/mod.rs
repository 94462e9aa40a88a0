//! Utility functions.

use glob::glob;
use std::path::PathBuf;

use crate::error::{PdfStitchError, Result};


/// Format a byte count as a human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}

/// Expand a list of path patterns into concrete file paths.
///
/// Patterns without glob metacharacters pass through untouched, so missing
/// files are reported by validation with their original spelling instead of
/// silently matching nothing. Expansion preserves the order of the pattern
/// list; matches within one pattern are sorted.
///
/// # Errors
///
/// Returns an error if a pattern is syntactically invalid or a glob pattern
/// matches no files.
pub fn collect_paths_for_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for pattern in patterns {
        paths.extend(collect_paths_for_pattern(pattern)?);
    }
    Ok(paths)
}

fn collect_paths_for_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    if !pattern.contains(['*', '?', '[']) {
        return Ok(vec![PathBuf::from(pattern)]);
    }

    let entries = glob(pattern)
        .map_err(|e| PdfStitchError::invalid_config(format!("Invalid pattern '{pattern}': {e}")))?;

    let mut matched: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .collect();
    matched.sort();

    if matched.is_empty() {
        return Err(PdfStitchError::invalid_config(format!(
            "Pattern '{pattern}' matched no files"
        )));
    }

    Ok(matched)
}
