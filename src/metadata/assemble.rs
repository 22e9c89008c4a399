//! Metadata assembly
//!
//! Combines the citation record, the version descriptor, and any caller
//! overrides into the flat field mapping handed to the embedding step.

use std::collections::BTreeMap;

use crate::citation::CitationRecord;
use crate::config::defaults::{CC_BY_NOTICE, DEFAULT_LICENSE, DEFAULT_TITLE, PRODUCER_BASE};
use crate::metadata::VersionDescriptor;

/// Caller-supplied replacements for individual metadata fields.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub title: Option<String>,
    pub author: Option<String>,
    pub doi: Option<String>,
    pub url: Option<String>,
}

/// Build the document-info field mapping.
///
/// Every derivation is independent and best-effort: fields whose sources are
/// absent are simply left out, and no key ever maps to a blank value. The
/// mapping is ordered, so identical inputs produce byte-identical output.
pub fn assemble_metadata(
    record: &CitationRecord,
    version: &VersionDescriptor,
    overrides: &Overrides,
) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();

    let title = overrides
        .title
        .clone()
        .or_else(|| record.title.clone())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());
    insert_non_blank(&mut fields, "Title", title);

    if let Some(author) = overrides.author.as_ref().or(record.author.as_ref()) {
        insert_non_blank(&mut fields, "Author", author.clone());
        insert_non_blank(&mut fields, "Creator", author.clone());
    }

    let release = version.release_label(record.version.as_deref());

    let producer = match &release {
        Some(label) => format!("{PRODUCER_BASE} ({label})"),
        None => PRODUCER_BASE.to_string(),
    };
    insert_non_blank(&mut fields, "Producer", producer);

    let mut keywords = record.keywords.join("; ");
    if let Some(label) = &release {
        if keywords.is_empty() {
            keywords = label.clone();
        } else {
            keywords = format!("{keywords}; {label}");
        }
    }
    insert_non_blank(&mut fields, "Keywords", keywords);

    // An override DOI replaces the record's everywhere it appears.
    let doi = overrides.doi.as_deref().or(record.doi.as_deref());

    let mut subject_parts: Vec<String> = Vec::new();
    if let Some(abstract_text) = &record.abstract_text {
        subject_parts.push(collapse_whitespace(abstract_text));
    }
    if let Some(doi) = doi {
        subject_parts.push(format!("DOI: {doi}"));
    }
    if let Some(code) = record.repository_code.as_deref().or(record.url.as_deref()) {
        subject_parts.push(format!("Code: {code}"));
    }
    if let Some(url) = &overrides.url {
        subject_parts.push(format!("URL: {url}"));
    }
    insert_non_blank(&mut fields, "Subject", subject_parts.join(" "));

    let license = record.license.as_deref().unwrap_or(DEFAULT_LICENSE);
    let copyright = if license.to_uppercase().contains("CC-BY") {
        CC_BY_NOTICE.to_string()
    } else {
        license.to_string()
    };
    insert_non_blank(&mut fields, "Copyright", copyright);

    if let Some(stamp) = record.date_released.as_deref().and_then(exif_timestamp) {
        insert_non_blank(&mut fields, "CreationDate", stamp.clone());
        insert_non_blank(&mut fields, "ModifyDate", stamp);
    }

    if let Some(doi) = doi {
        insert_non_blank(&mut fields, "Identifier", doi.to_string());
    }

    fields
}

/// `"YYYY-MM-DD"` release date as an ExifTool timestamp, `"YYYY:MM:DD 00:00:00"`.
///
/// Anything other than exactly three `-`-separated components is rejected;
/// a partial date is never written.
fn exif_timestamp(date_released: &str) -> Option<String> {
    let parts: Vec<&str> = date_released.split('-').collect();
    match parts[..] {
        [year, month, day] => Some(format!("{year}:{month}:{day} 00:00:00")),
        _ => None,
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn insert_non_blank(fields: &mut BTreeMap<String, String>, key: &str, value: String) {
    if !value.trim().is_empty() {
        fields.insert(key.to_string(), value);
    }
}
