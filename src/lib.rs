pub mod citation;
pub mod cli;
pub mod config;
pub mod error;
pub mod metadata;
pub mod pdf;

pub use citation::{parse_citation, CitationRecord};
pub use cli::Quality;
pub use config::Settings;
pub use error::{CompressError, EmbedError};
pub use metadata::{assemble_metadata, Overrides, VersionDescriptor};
pub use pdf::{compress_pdf, embed_metadata, verify_metadata, CompressStats};

use std::collections::BTreeMap;

/// High-level API for building a document's metadata mapping.
///
/// This is the recommended entry point for library consumers: hand it the
/// raw citation-file text (if any), the version descriptor, and any
/// overrides, and it returns the field mapping ready for
/// [`pdf::embed_metadata`]. The whole pipeline is best-effort - absent or
/// malformed inputs shrink the mapping instead of failing.
///
/// # Example
///
/// ```
/// use pdf_release::{build_metadata, Overrides, VersionDescriptor};
///
/// let cff = "title: Example Study\ndoi: 10.5281/zenodo.1234\n";
/// let metadata = build_metadata(Some(cff), &VersionDescriptor::default(), &Overrides::default());
///
/// assert_eq!(metadata["Title"], "Example Study");
/// assert_eq!(metadata["Identifier"], "10.5281/zenodo.1234");
/// ```
pub fn build_metadata(
    citation_text: Option<&str>,
    version: &VersionDescriptor,
    overrides: &Overrides,
) -> BTreeMap<String, String> {
    let record = citation_text.map(parse_citation).unwrap_or_default();
    assemble_metadata(&record, version, overrides)
}
