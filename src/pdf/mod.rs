//! External-tool collaborators for the two processing steps

pub mod compress;
pub mod embed;

pub use compress::{compress_pdf, compress_streams, CompressStats};
pub use embed::{embed_metadata, verify_metadata, write_document_info, VERIFY_FIELDS};
