//! Integration tests for the blank-page filter and marker scrubbing.

use image::{DynamicImage, GrayImage, Luma};
use std::collections::HashSet;
use std::path::Path;
use tempfile::TempDir;

use pdfstitch::error::PdfStitchError;
use pdfstitch::merge::Merger;
use pdfstitch::render::PageRenderer;

use crate::common::{page_texts, test_config, write_numbered_pdf, write_pdf, MARKER_PREFIX};

/// Renderer returning a white image for listed (file name, page index)
/// pairs and a dark one otherwise.
struct StubRenderer {
    blank_pages: HashSet<(String, usize)>,
}

impl StubRenderer {
    fn new(blank_pages: &[(&str, usize)]) -> Self {
        Self {
            blank_pages: blank_pages
                .iter()
                .map(|&(name, page)| (name.to_string(), page))
                .collect(),
        }
    }
}

impl PageRenderer for StubRenderer {
    fn render_page(
        &self,
        path: &Path,
        page_index: usize,
    ) -> pdfstitch::Result<DynamicImage> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let shade = if self.blank_pages.contains(&(name, page_index)) {
            255
        } else {
            30
        };
        Ok(DynamicImage::ImageLuma8(GrayImage::from_pixel(
            20,
            20,
            Luma([shade]),
        )))
    }
}

#[tokio::test]
async fn test_blank_pages_dropped() {
    let temp_dir = TempDir::new().unwrap();
    let a = temp_dir.path().join("a.pdf");
    write_numbered_pdf(&a, "A", 5);

    let mut config = test_config(vec![a], temp_dir.path().join("out.pdf"));
    config.filters.drop_blank = true;

    let renderer = StubRenderer::new(&[("a.pdf", 1), ("a.pdf", 3)]);
    let merger = Merger::new();
    let outcome = merger.merge(&config, Some(&renderer)).await.unwrap();

    assert_eq!(outcome.statistics.pages_filtered, 2);
    assert_eq!(
        page_texts(&outcome.document),
        vec!["A page 1", "A page 3", "A page 5"]
    );
}

#[tokio::test]
async fn test_blank_filter_without_renderer_fails() {
    let temp_dir = TempDir::new().unwrap();
    let a = temp_dir.path().join("a.pdf");
    write_numbered_pdf(&a, "A", 2);

    let mut config = test_config(vec![a], temp_dir.path().join("out.pdf"));
    config.filters.drop_blank = true;

    let merger = Merger::new();
    let err = merger.merge(&config, None).await.unwrap_err();

    assert!(matches!(err, PdfStitchError::RendererUnavailable));
}

#[tokio::test]
async fn test_blank_filter_combined_with_deletion() {
    let temp_dir = TempDir::new().unwrap();
    let a = temp_dir.path().join("a.pdf");
    write_numbered_pdf(&a, "A", 4);

    let mut config = test_config(vec![a], temp_dir.path().join("out.pdf"));
    config.formula = "[1:1]".to_string();
    config.filters.drop_blank = true;

    // Page 3 (zero-based index 2) is blank; page 1 is deleted by formula.
    let renderer = StubRenderer::new(&[("a.pdf", 2)]);
    let merger = Merger::new();
    let outcome = merger.merge(&config, Some(&renderer)).await.unwrap();

    assert_eq!(outcome.statistics.pages_deleted, 1);
    assert_eq!(outcome.statistics.pages_filtered, 1);
    assert_eq!(page_texts(&outcome.document), vec!["A page 2", "A page 4"]);
}

#[tokio::test]
async fn test_marker_pages_scrubbed() {
    let temp_dir = TempDir::new().unwrap();
    let a = temp_dir.path().join("a.pdf");
    let marker = format!("{MARKER_PREFIX} 1234.docx");
    write_pdf(&a, &["Report intro", &marker, "Report body"]);

    let mut config = test_config(vec![a], temp_dir.path().join("out.pdf"));
    config.filters.scrub_markers = true;

    let merger = Merger::new();
    let outcome = merger.merge(&config, None).await.unwrap();

    assert_eq!(outcome.scrubbed_pages, vec![2]);
    assert_eq!(outcome.statistics.pages_scrubbed, 1);
    assert_eq!(
        page_texts(&outcome.document),
        vec!["Report intro", "Report body"]
    );
}

#[tokio::test]
async fn test_marker_positions_reported_in_merged_output() {
    let temp_dir = TempDir::new().unwrap();
    let a = temp_dir.path().join("a.pdf");
    let b = temp_dir.path().join("b.pdf");
    let marker = format!("{MARKER_PREFIX} x");
    write_pdf(&a, &["A1", "A2"]);
    write_pdf(&b, &[&marker, "B2"]);

    let mut config = test_config(vec![a, b], temp_dir.path().join("out.pdf"));
    config.filters.scrub_markers = true;

    let merger = Merger::new();
    let outcome = merger.merge(&config, None).await.unwrap();

    // The marker is page 3 of the assembled output.
    assert_eq!(outcome.scrubbed_pages, vec![3]);
    assert_eq!(page_texts(&outcome.document), vec!["A1", "A2", "B2"]);
}

#[tokio::test]
async fn test_keep_markers_disables_scrubbing() {
    let temp_dir = TempDir::new().unwrap();
    let a = temp_dir.path().join("a.pdf");
    let marker = format!("{MARKER_PREFIX} kept");
    write_pdf(&a, &["Front", &marker]);

    let mut config = test_config(vec![a], temp_dir.path().join("out.pdf"));
    config.filters.scrub_markers = false;

    let merger = Merger::new();
    let outcome = merger.merge(&config, None).await.unwrap();

    assert!(outcome.scrubbed_pages.is_empty());
    assert_eq!(outcome.statistics.total_pages, 2);
}

#[tokio::test]
async fn test_scrub_after_deletion_positions() {
    let temp_dir = TempDir::new().unwrap();
    let a = temp_dir.path().join("a.pdf");
    let marker = format!("{MARKER_PREFIX} y");
    write_pdf(&a, &["Drop me", "Keep me", &marker]);

    let mut config = test_config(vec![a], temp_dir.path().join("out.pdf"));
    config.formula = "[1:1]".to_string();
    config.filters.scrub_markers = true;

    let merger = Merger::new();
    let outcome = merger.merge(&config, None).await.unwrap();

    // After deleting page 1, the marker sits at position 2 of the output.
    assert_eq!(outcome.scrubbed_pages, vec![2]);
    assert_eq!(page_texts(&outcome.document), vec!["Keep me"]);
}
