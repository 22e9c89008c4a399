//! Metadata embedding and read-back
//!
//! The primary writer is ExifTool, which handles both the document-info
//! dictionary and XMP. When it is missing or its run fails, the fields are
//! written straight into the PDF's Info dictionary with lopdf instead.

use std::collections::BTreeMap;
use std::path::Path;
use std::process::Command;

use lopdf::{Dictionary, Document, Object};

use crate::error::EmbedError;

/// Fields read back during verification.
pub const VERIFY_FIELDS: &[&str] = &[
    "Title", "Author", "Subject", "Keywords", "Creator", "Producer", "Copyright",
];

/// Embed the metadata mapping into the PDF at `path`, in place.
///
/// Blank values are skipped. Any ExifTool problem (not installed, or a
/// failed run) routes to the direct document-info write.
pub fn embed_metadata(path: &Path, metadata: &BTreeMap<String, String>) -> Result<(), EmbedError> {
    match run_exiftool(path, metadata) {
        Ok(()) => Ok(()),
        Err(reason) => {
            log::warn!("{reason}; writing document info directly");
            write_document_info(path, metadata)
        }
    }
}

fn run_exiftool(path: &Path, metadata: &BTreeMap<String, String>) -> Result<(), String> {
    let mut cmd = Command::new("exiftool");
    for (key, value) in metadata {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        cmd.arg(format!("-{key}={value}"));
    }
    cmd.arg("-overwrite_original").arg(path);

    match cmd.output() {
        Ok(out) if out.status.success() => Ok(()),
        Ok(out) => Err(format!(
            "exiftool exited with {}: {}",
            out.status,
            String::from_utf8_lossy(&out.stderr).trim()
        )),
        Err(e) => Err(format!("failed to launch exiftool: {e}")),
    }
}

/// Write the fields into the PDF's Info dictionary, creating it if absent.
///
/// This is the fallback path behind [`embed_metadata`]; callers without
/// ExifTool can also use it directly. `ModifyDate` is stored under the
/// Info-dictionary spelling `ModDate`, and both date fields are re-encoded
/// in PDF date syntax. The rewritten document is staged in a temporary file
/// and renamed over `path`.
pub fn write_document_info(
    path: &Path,
    metadata: &BTreeMap<String, String>,
) -> Result<(), EmbedError> {
    let mut doc = Document::load(path)?;

    let info_id = match doc.trailer.get(b"Info").and_then(|obj| obj.as_reference()) {
        Ok(id) => id,
        Err(_) => {
            let id = doc.add_object(Dictionary::new());
            doc.trailer.set("Info", Object::Reference(id));
            id
        }
    };

    let info = doc.get_object_mut(info_id)?.as_dict_mut()?;
    for (key, value) in metadata {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match key.as_str() {
            "CreationDate" => info.set("CreationDate", Object::string_literal(pdf_date(value))),
            "ModifyDate" => info.set("ModDate", Object::string_literal(pdf_date(value))),
            _ => info.set(key.as_bytes().to_vec(), Object::string_literal(value)),
        }
    }

    let staging = tempfile::Builder::new()
        .suffix(".pdf")
        .tempfile_in(parent_dir(path))?
        .into_temp_path();
    doc.save(&staging)?;
    staging.persist(path).map_err(|e| EmbedError::Io(e.error))?;

    Ok(())
}

/// Read back the given fields, for display.
///
/// Tries ExifTool first, then the Info dictionary; `None` means neither
/// reader could produce anything (verification is skipped, never an error).
pub fn verify_metadata(path: &Path, fields: &[&str]) -> Option<String> {
    run_exiftool_read(path, fields).or_else(|| read_document_info(path, fields))
}

fn run_exiftool_read(path: &Path, fields: &[&str]) -> Option<String> {
    let mut cmd = Command::new("exiftool");
    for field in fields {
        cmd.arg(format!("-{field}"));
    }
    let out = cmd.arg(path).output().ok()?;
    if !out.status.success() {
        return None;
    }

    let report = String::from_utf8_lossy(&out.stdout).into_owned();
    if report.trim().is_empty() {
        None
    } else {
        Some(report)
    }
}

fn read_document_info(path: &Path, fields: &[&str]) -> Option<String> {
    let doc = Document::load(path).ok()?;
    let info_id = doc
        .trailer
        .get(b"Info")
        .and_then(|obj| obj.as_reference())
        .ok()?;
    let info = doc.get_object(info_id).ok()?.as_dict().ok()?;

    let mut lines = Vec::new();
    for field in fields {
        let info_key = match *field {
            "ModifyDate" => "ModDate",
            other => other,
        };
        if let Ok(bytes) = info.get(info_key.as_bytes()).and_then(|obj| obj.as_str()) {
            lines.push(format!("{}: {}", field, String::from_utf8_lossy(bytes)));
        }
    }

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

/// `"2024:03:15 00:00:00"` (ExifTool form) as a PDF date, `"D:20240315000000"`.
fn pdf_date(stamp: &str) -> String {
    let digits: String = stamp.chars().filter(char::is_ascii_digit).collect();
    format!("D:{digits}")
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}
