//! Shared helpers for integration tests.
//!
//! Fixtures are generated with lopdf rather than checked in, so every test
//! controls the exact page text it merges.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::path::{Path, PathBuf};

use pdfstitch::config::{Config, FilterOptions, OverwriteMode};

/// Marker prefix used by the scrubbing pass.
pub const MARKER_PREFIX: &str = pdfstitch::filter::MARKER_PREFIX;

/// Build an in-memory document with one page per entry in `texts`.
pub fn build_document(texts: &[&str]) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut page_ids: Vec<Object> = Vec::with_capacity(texts.len());
    for text in texts {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode page content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        page_ids.push(page_id.into());
    }

    let count = page_ids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids,
            "Count" => count,
            "Resources" => resources_id,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc
}

/// Write a fixture PDF with one page per entry in `texts`.
pub fn write_pdf(path: &Path, texts: &[&str]) {
    let mut doc = build_document(texts);
    doc.save(path).expect("save fixture PDF");
}

/// Write a fixture PDF with `page_count` numbered pages, labeled by `tag`.
pub fn write_numbered_pdf(path: &Path, tag: &str, page_count: usize) {
    let texts: Vec<String> = (1..=page_count)
        .map(|i| format!("{tag} page {i}"))
        .collect();
    let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
    write_pdf(path, &refs);
}

/// A quiet force-overwrite config for `inputs` and `output`.
pub fn test_config(inputs: Vec<PathBuf>, output: PathBuf) -> Config {
    Config {
        inputs,
        output,
        formula: String::new(),
        filters: FilterOptions::default(),
        dry_run: false,
        verbose: false,
        quiet: true,
        overwrite_mode: OverwriteMode::Force,
    }
}

/// Extract the first text line of every page of `doc`, in page order.
pub fn page_texts(doc: &Document) -> Vec<String> {
    doc.get_pages()
        .keys()
        .map(|&num| {
            let text = doc.extract_text(&[num]).unwrap_or_default();
            text.lines().next().unwrap_or("").trim_end().to_string()
        })
        .collect()
}
