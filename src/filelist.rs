//! Ordered input-file list.
//!
//! A plain value object holding the PDF paths to merge, in merge order. The
//! caller (CLI, or whatever front end drives the library) mutates it with
//! explicit operations before a merge; during a merge it is read-only. File
//! indices in a deletion formula refer to 1-based positions in this list.

use std::path::{Path, PathBuf};

/// Ordered sequence of input file paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileList {
    paths: Vec<PathBuf>,
}

impl FileList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a path at the end of the list.
    pub fn push(&mut self, path: impl Into<PathBuf>) {
        self.paths.push(path.into());
    }

    /// Swap the entry at `index` with its predecessor.
    ///
    /// Returns false (and leaves the list untouched) when `index` is 0 or
    /// out of range.
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.paths.len() {
            return false;
        }
        self.paths.swap(index, index - 1);
        true
    }

    /// Swap the entry at `index` with its successor.
    ///
    /// Returns false (and leaves the list untouched) when `index` is the
    /// last entry or out of range.
    pub fn move_down(&mut self, index: usize) -> bool {
        if index + 1 >= self.paths.len() {
            return false;
        }
        self.paths.swap(index, index + 1);
        true
    }

    /// Remove and return the entry at `index`, or None if out of range.
    pub fn remove(&mut self, index: usize) -> Option<PathBuf> {
        if index < self.paths.len() {
            Some(self.paths.remove(index))
        } else {
            None
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// True if the list holds no entries.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// The entries as a slice, in merge order.
    pub fn as_slice(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Iterate over the entries in merge order.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }

    /// Consume the list, returning the underlying vector.
    pub fn into_inner(self) -> Vec<PathBuf> {
        self.paths
    }
}

impl FromIterator<PathBuf> for FileList {
    fn from_iter<I: IntoIterator<Item = PathBuf>>(iter: I) -> Self {
        Self {
            paths: iter.into_iter().collect(),
        }
    }
}
