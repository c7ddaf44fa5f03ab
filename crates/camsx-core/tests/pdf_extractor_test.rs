//! Extraction from real PDF files built with lopdf.

use std::path::Path;

use camsx_core::{ExtractionConfig, ExtractionStatus, StatementExtractor};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// Write a one-page statement whose only font has the given `/Encoding` name.
fn write_statement(path: &Path, encoding: &str, text: &str) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => encoding,
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("Td", vec![72.into(), 720.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

#[test]
fn test_unknown_font_encoding_is_a_scan_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("statement.pdf");
    write_statement(&path, "BogusEncoding", "Folio No: 1/1");

    let result = StatementExtractor::new(ExtractionConfig::default()).extract(&path, None);

    assert!(
        matches!(result.status, ExtractionStatus::ScanFailure(_)),
        "unexpected status: {}",
        result.status
    );
    assert!(result
        .status
        .to_string()
        .starts_with("An unexpected error occurred during PDF processing: "));
    assert_eq!(result.records, Some(Vec::new()));
}
