use std::fs;
use std::path::{Path, PathBuf};

use lopdf::{Dictionary, Document, Object};

use pdf_release::metadata::VersionDescriptor;
use pdf_release::pdf::{compress_streams, verify_metadata, write_document_info, VERIFY_FIELDS};
use pdf_release::{build_metadata, parse_citation, Overrides};

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixture_citation() -> String {
    fs::read_to_string(fixtures_path().join("CITATION.cff")).expect("Failed to read CITATION.cff")
}

fn fixture_version() -> VersionDescriptor {
    VersionDescriptor::load(&fixtures_path().join("VERSION.json"))
}

#[test]
fn test_extract_fixture_citation() {
    let record = parse_citation(&fixture_citation());

    assert_eq!(
        record.title.as_deref(),
        Some("Thermal Emission Profiling Experiment")
    );
    assert_eq!(record.doi.as_deref(), Some("10.5281/zenodo.1234567"));
    assert_eq!(record.date_released.as_deref(), Some("2024-03-15"));
    assert_eq!(record.version.as_deref(), Some("0.9.2"));
    assert_eq!(record.url.as_deref(), Some("https://tep-exp.example.org"));
    assert_eq!(
        record.repository_code.as_deref(),
        Some("https://github.com/tep-exp/pipeline")
    );
    assert_eq!(record.license.as_deref(), Some("CC-BY-4.0"));

    // Only the first listed author is captured.
    assert_eq!(record.author.as_deref(), Some("Adaeze Okonkwo"));

    assert_eq!(
        record.keywords,
        vec!["thermal emission", "calibration", "open data"]
    );

    let abstract_text = record.abstract_text.expect("abstract should be captured");
    assert!(abstract_text.starts_with("Long-term thermal emission"));
    assert!(abstract_text.ends_with("2024 data release."));
}

#[test]
fn test_version_descriptor_fixture() {
    let version = fixture_version();
    assert_eq!(version.codename.as_deref(), Some("Kestrel"));
    assert_eq!(version.version.as_deref(), Some("0.9.2"));
}

#[test]
fn test_assemble_from_fixtures() {
    let citation = fixture_citation();
    let metadata = build_metadata(Some(&citation), &fixture_version(), &Overrides::default());

    assert_eq!(metadata["Title"], "Thermal Emission Profiling Experiment");
    assert_eq!(metadata["Author"], "Adaeze Okonkwo");
    assert_eq!(metadata["Creator"], "Adaeze Okonkwo");
    assert_eq!(
        metadata["Producer"],
        "TEP-EXP Research Project (Kestrel v0.9.2)"
    );
    assert_eq!(
        metadata["Keywords"],
        "thermal emission; calibration; open data; Kestrel v0.9.2"
    );
    assert_eq!(
        metadata["Copyright"],
        "Creative Commons Attribution 4.0 International License (CC BY 4.0)"
    );
    assert_eq!(metadata["CreationDate"], "2024:03:15 00:00:00");
    assert_eq!(metadata["ModifyDate"], "2024:03:15 00:00:00");
    assert_eq!(metadata["Identifier"], "10.5281/zenodo.1234567");

    let subject = &metadata["Subject"];
    assert!(subject.starts_with("Long-term thermal emission measurements"));
    assert!(!subject.contains('\n'));
    assert!(subject.contains("DOI: 10.5281/zenodo.1234567"));
    assert!(subject.ends_with("Code: https://github.com/tep-exp/pipeline"));
}

#[test]
fn test_overrides_flow_through() {
    let citation = fixture_citation();
    let overrides = Overrides {
        author: Some("Maarten Lindqvist".to_string()),
        doi: Some("10.9999/override".to_string()),
        url: Some("https://mirror.example.org".to_string()),
        ..Default::default()
    };
    let metadata = build_metadata(Some(&citation), &fixture_version(), &overrides);

    assert_eq!(metadata["Author"], "Maarten Lindqvist");
    assert_eq!(metadata["Creator"], "Maarten Lindqvist");
    assert_eq!(metadata["Identifier"], "10.9999/override");
    assert!(metadata["Subject"].contains("DOI: 10.9999/override"));
    assert!(!metadata["Subject"].contains("10.5281/zenodo.1234567"));
    assert!(metadata["Subject"].ends_with("URL: https://mirror.example.org"));
}

#[test]
fn test_missing_inputs_still_produce_defaults() {
    let metadata = build_metadata(None, &VersionDescriptor::default(), &Overrides::default());

    assert_eq!(metadata["Title"], "TEP-EXP");
    assert_eq!(metadata["Producer"], "TEP-EXP Research Project");
    assert_eq!(
        metadata["Copyright"],
        "Creative Commons Attribution 4.0 International License (CC BY 4.0)"
    );
    assert!(!metadata.contains_key("Author"));
    assert!(!metadata.contains_key("Keywords"));
    assert!(!metadata.contains_key("Identifier"));
}

/// Build a minimal but structurally valid PDF for the lopdf-based paths.
fn create_minimal_pdf(path: &Path) {
    let mut doc = Document::with_version("1.7");

    let mut pages = Dictionary::new();
    pages.set("Type", Object::Name(b"Pages".to_vec()));
    pages.set("Count", Object::Integer(0));
    pages.set("Kids", Object::Array(vec![]));
    let pages_id = doc.add_object(pages);

    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog.set("Pages", Object::Reference(pages_id));
    let catalog_id = doc.add_object(catalog);

    doc.trailer.set("Root", Object::Reference(catalog_id));
    doc.save(path).expect("Failed to save minimal PDF");
}

fn info_dict(doc: &Document) -> &Dictionary {
    let info_id = doc
        .trailer
        .get(b"Info")
        .and_then(|obj| obj.as_reference())
        .expect("Info reference should exist");
    doc.get_object(info_id)
        .and_then(|obj| obj.as_dict())
        .expect("Info should be a dictionary")
}

fn info_string(info: &Dictionary, key: &str) -> String {
    let bytes = info
        .get(key.as_bytes())
        .and_then(|obj| obj.as_str())
        .unwrap_or_else(|_| panic!("missing Info key {key}"));
    String::from_utf8_lossy(bytes).into_owned()
}

#[test]
fn test_fallback_write_populates_info_dictionary() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let pdf_path = dir.path().join("paper.pdf");
    create_minimal_pdf(&pdf_path);

    let citation = fixture_citation();
    let metadata = build_metadata(Some(&citation), &fixture_version(), &Overrides::default());
    write_document_info(&pdf_path, &metadata).expect("Failed to write document info");

    let doc = Document::load(&pdf_path).expect("Failed to reload PDF");
    let info = info_dict(&doc);

    assert_eq!(
        info_string(info, "Title"),
        "Thermal Emission Profiling Experiment"
    );
    assert_eq!(info_string(info, "Author"), "Adaeze Okonkwo");
    assert_eq!(
        info_string(info, "Producer"),
        "TEP-EXP Research Project (Kestrel v0.9.2)"
    );
    // Dates are re-encoded in PDF syntax under the Info-dict key names.
    assert_eq!(info_string(info, "CreationDate"), "D:20240315000000");
    assert_eq!(info_string(info, "ModDate"), "D:20240315000000");
    assert!(info.get(b"ModifyDate").is_err());
}

#[test]
fn test_fallback_write_overwrites_existing_values() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let pdf_path = dir.path().join("paper.pdf");
    create_minimal_pdf(&pdf_path);

    let mut first = std::collections::BTreeMap::new();
    first.insert("Title".to_string(), "Initial".to_string());
    write_document_info(&pdf_path, &first).expect("Failed first write");

    let mut second = std::collections::BTreeMap::new();
    second.insert("Title".to_string(), "Replaced".to_string());
    write_document_info(&pdf_path, &second).expect("Failed second write");

    let doc = Document::load(&pdf_path).expect("Failed to reload PDF");
    assert_eq!(info_string(info_dict(&doc), "Title"), "Replaced");
}

#[test]
fn test_verification_reads_back_fields() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let pdf_path = dir.path().join("paper.pdf");
    create_minimal_pdf(&pdf_path);

    let citation = fixture_citation();
    let metadata = build_metadata(Some(&citation), &fixture_version(), &Overrides::default());
    write_document_info(&pdf_path, &metadata).expect("Failed to write document info");

    let report = verify_metadata(&pdf_path, VERIFY_FIELDS);
    assert!(report.is_some(), "expected some metadata reader to succeed");
}

#[test]
fn test_stream_compression_keeps_document_loadable() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let pdf_path = dir.path().join("paper.pdf");
    create_minimal_pdf(&pdf_path);

    let bytes = fs::read(&pdf_path).expect("Failed to read PDF");
    let rewritten = compress_streams(&bytes).expect("Failed to recompress streams");

    assert!(rewritten.starts_with(b"%PDF"));
    Document::load_mem(&rewritten).expect("Recompressed PDF should still parse");
}
