//! Integration tests for basic PDF merging operations.

use pdfstitch::io::{PdfReader, PdfWriter};
use pdfstitch::merge::Merger;
use tempfile::TempDir;

use crate::common::{page_texts, test_config, write_numbered_pdf};

#[tokio::test]
async fn test_merge_two_pdfs_preserves_order() {
    let temp_dir = TempDir::new().unwrap();
    let a = temp_dir.path().join("a.pdf");
    let b = temp_dir.path().join("b.pdf");
    write_numbered_pdf(&a, "A", 3);
    write_numbered_pdf(&b, "B", 2);

    let config = test_config(vec![a, b], temp_dir.path().join("out.pdf"));
    let merger = Merger::new();
    let outcome = merger.merge(&config, None).await.unwrap();

    assert_eq!(outcome.statistics.files_merged, 2);
    assert_eq!(outcome.statistics.total_pages, 5);
    assert_eq!(
        page_texts(&outcome.document),
        vec!["A page 1", "A page 2", "A page 3", "B page 1", "B page 2"]
    );
}

#[tokio::test]
async fn test_merge_single_pdf() {
    let temp_dir = TempDir::new().unwrap();
    let a = temp_dir.path().join("a.pdf");
    write_numbered_pdf(&a, "A", 4);

    let config = test_config(vec![a], temp_dir.path().join("out.pdf"));
    let merger = Merger::new();
    let outcome = merger.merge(&config, None).await.unwrap();

    assert_eq!(outcome.statistics.files_merged, 1);
    assert_eq!(outcome.statistics.total_pages, 4);
}

#[tokio::test]
async fn test_merge_respects_input_order() {
    let temp_dir = TempDir::new().unwrap();
    let a = temp_dir.path().join("a.pdf");
    let b = temp_dir.path().join("b.pdf");
    write_numbered_pdf(&a, "A", 1);
    write_numbered_pdf(&b, "B", 1);

    // Same files, reversed order.
    let config = test_config(vec![b, a], temp_dir.path().join("out.pdf"));
    let merger = Merger::new();
    let outcome = merger.merge(&config, None).await.unwrap();

    assert_eq!(page_texts(&outcome.document), vec!["B page 1", "A page 1"]);
}

#[tokio::test]
async fn test_merged_output_round_trips() {
    let temp_dir = TempDir::new().unwrap();
    let a = temp_dir.path().join("a.pdf");
    let b = temp_dir.path().join("b.pdf");
    write_numbered_pdf(&a, "A", 2);
    write_numbered_pdf(&b, "B", 3);
    let output = temp_dir.path().join("merged.pdf");

    let config = test_config(vec![a, b], output.clone());
    let merger = Merger::new();
    let outcome = merger.merge(&config, None).await.unwrap();

    let writer = PdfWriter::new();
    let stats = writer
        .save_with_stats(&outcome.document, &output)
        .await
        .unwrap();
    assert!(output.exists());
    assert!(stats.file_size > 0);
    assert_eq!(stats.page_count, 5);

    // The written file must load back with the same pages.
    let reader = PdfReader::new();
    let reloaded = reader.load(&output).unwrap();
    assert_eq!(reloaded.page_count, 5);
    assert_eq!(
        page_texts(&reloaded.document),
        vec!["A page 1", "A page 2", "B page 1", "B page 2", "B page 3"]
    );
}

#[tokio::test]
async fn test_merge_same_file_twice() {
    let temp_dir = TempDir::new().unwrap();
    let a = temp_dir.path().join("a.pdf");
    write_numbered_pdf(&a, "A", 2);

    let config = test_config(vec![a.clone(), a], temp_dir.path().join("out.pdf"));
    let merger = Merger::new();
    let outcome = merger.merge(&config, None).await.unwrap();

    assert_eq!(outcome.statistics.total_pages, 4);
    assert_eq!(
        page_texts(&outcome.document),
        vec!["A page 1", "A page 2", "A page 1", "A page 2"]
    );
}
