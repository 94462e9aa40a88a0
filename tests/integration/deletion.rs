//! Integration tests for the page-deletion formula.

use pdfstitch::error::PdfStitchError;
use pdfstitch::merge::Merger;
use tempfile::TempDir;

use crate::common::{page_texts, test_config, write_numbered_pdf};

#[tokio::test]
async fn test_delete_pages_from_single_file() {
    let temp_dir = TempDir::new().unwrap();
    let a = temp_dir.path().join("a.pdf");
    write_numbered_pdf(&a, "A", 10);

    let mut config = test_config(vec![a], temp_dir.path().join("out.pdf"));
    config.formula = "[1:1,10]".to_string();

    let merger = Merger::new();
    let outcome = merger.merge(&config, None).await.unwrap();

    assert_eq!(outcome.statistics.total_pages, 8);
    assert_eq!(outcome.statistics.pages_deleted, 2);
    let texts = page_texts(&outcome.document);
    assert_eq!(texts.first().map(String::as_str), Some("A page 2"));
    assert_eq!(texts.last().map(String::as_str), Some("A page 9"));
}

#[tokio::test]
async fn test_delete_range_and_singles() {
    let temp_dir = TempDir::new().unwrap();
    let a = temp_dir.path().join("a.pdf");
    write_numbered_pdf(&a, "A", 8);

    let mut config = test_config(vec![a], temp_dir.path().join("out.pdf"));
    config.formula = "[1:2-4,7]".to_string();

    let merger = Merger::new();
    let outcome = merger.merge(&config, None).await.unwrap();

    assert_eq!(
        page_texts(&outcome.document),
        vec!["A page 1", "A page 5", "A page 6", "A page 8"]
    );
}

#[tokio::test]
async fn test_delete_across_multiple_files() {
    let temp_dir = TempDir::new().unwrap();
    let a = temp_dir.path().join("a.pdf");
    let b = temp_dir.path().join("b.pdf");
    write_numbered_pdf(&a, "A", 3);
    write_numbered_pdf(&b, "B", 3);

    let mut config = test_config(vec![a, b], temp_dir.path().join("out.pdf"));
    config.formula = "[1:1][2:3]".to_string();

    let merger = Merger::new();
    let outcome = merger.merge(&config, None).await.unwrap();

    assert_eq!(
        page_texts(&outcome.document),
        vec!["A page 2", "A page 3", "B page 1", "B page 2"]
    );
}

#[tokio::test]
async fn test_formula_with_whitespace() {
    let temp_dir = TempDir::new().unwrap();
    let a = temp_dir.path().join("a.pdf");
    write_numbered_pdf(&a, "A", 5);

    let mut config = test_config(vec![a], temp_dir.path().join("out.pdf"));
    config.formula = " [1: 2, 4] ".to_string();

    let merger = Merger::new();
    let outcome = merger.merge(&config, None).await.unwrap();

    assert_eq!(
        page_texts(&outcome.document),
        vec!["A page 1", "A page 3", "A page 5"]
    );
}

#[tokio::test]
async fn test_empty_formula_keeps_everything() {
    let temp_dir = TempDir::new().unwrap();
    let a = temp_dir.path().join("a.pdf");
    write_numbered_pdf(&a, "A", 3);

    let mut config = test_config(vec![a], temp_dir.path().join("out.pdf"));
    config.formula = "   ".to_string();

    let merger = Merger::new();
    let outcome = merger.merge(&config, None).await.unwrap();

    assert_eq!(outcome.statistics.total_pages, 3);
    assert_eq!(outcome.statistics.pages_deleted, 0);
}

#[tokio::test]
async fn test_overlapping_deletions_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let a = temp_dir.path().join("a.pdf");
    write_numbered_pdf(&a, "A", 5);

    let mut config = test_config(vec![a], temp_dir.path().join("out.pdf"));
    config.formula = "[1:2][1:2]".to_string();

    let merger = Merger::new();
    let err = merger.merge(&config, None).await.unwrap_err();

    assert!(matches!(err, PdfStitchError::FormulaOverlap { .. }));
}

#[tokio::test]
async fn test_page_out_of_range_rejected_before_merge() {
    let temp_dir = TempDir::new().unwrap();
    let a = temp_dir.path().join("a.pdf");
    write_numbered_pdf(&a, "A", 3);
    let output = temp_dir.path().join("out.pdf");

    let mut config = test_config(vec![a], output.clone());
    config.formula = "[1:9]".to_string();

    let merger = Merger::new();
    let err = merger.merge(&config, None).await.unwrap_err();

    assert!(matches!(err, PdfStitchError::PageOutOfRange { .. }));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_unknown_file_index_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let a = temp_dir.path().join("a.pdf");
    write_numbered_pdf(&a, "A", 3);

    let mut config = test_config(vec![a], temp_dir.path().join("out.pdf"));
    config.formula = "[3:1]".to_string();

    let merger = Merger::new();
    let err = merger.merge(&config, None).await.unwrap_err();

    assert!(matches!(err, PdfStitchError::UnknownFileIndex { .. }));
}
