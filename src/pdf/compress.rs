//! PDF compression pass
//!
//! The primary path shells out to Ghostscript's pdfwrite device with a
//! quality preset. When gs is not installed, the document's streams are
//! recompressed in-process with lopdf instead; that rewrite is weaker than a
//! full Ghostscript pass, so the original bytes are kept whenever it fails
//! to shrink the file.

use std::fs;
use std::io;
use std::path::Path;
use std::process::Command;

use crate::cli::Quality;
use crate::error::CompressError;

/// File sizes before and after the compression pass.
#[derive(Debug, Clone, Copy)]
pub struct CompressStats {
    pub original_bytes: u64,
    pub compressed_bytes: u64,
}

impl CompressStats {
    pub fn original_mb(&self) -> f64 {
        self.original_bytes as f64 / (1024.0 * 1024.0)
    }

    pub fn compressed_mb(&self) -> f64 {
        self.compressed_bytes as f64 / (1024.0 * 1024.0)
    }

    pub fn reduction_pct(&self) -> f64 {
        if self.original_bytes == 0 {
            return 0.0;
        }
        (self.original_bytes as f64 - self.compressed_bytes as f64)
            / self.original_bytes as f64
            * 100.0
    }
}

/// Compress the PDF at `input` into `output` (the paths may be equal).
///
/// The result is staged in a temporary file and renamed over `output`, so a
/// failed run never clobbers an existing document.
pub fn compress_pdf(
    input: &Path,
    output: &Path,
    quality: Quality,
) -> Result<CompressStats, CompressError> {
    let original_bytes = fs::metadata(input)?.len();

    let staging = tempfile::Builder::new()
        .suffix(".pdf")
        .tempfile_in(parent_dir(output))?
        .into_temp_path();

    match run_ghostscript(input, &staging, quality) {
        Ok(()) => {}
        Err(CompressError::Launch { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            log::warn!("gs not found; falling back to in-process stream compression");
            return compress_in_process(input, output, original_bytes);
        }
        Err(e) => return Err(e),
    }

    let compressed_bytes = fs::metadata(&staging)?.len();
    staging.persist(output).map_err(|e| CompressError::Io(e.error))?;

    Ok(CompressStats {
        original_bytes,
        compressed_bytes,
    })
}

fn run_ghostscript(input: &Path, output: &Path, quality: Quality) -> Result<(), CompressError> {
    let result = Command::new("gs")
        .arg("-sDEVICE=pdfwrite")
        .arg("-dCompatibilityLevel=1.4")
        .arg(format!("-dPDFSETTINGS={}", quality.gs_setting()))
        .arg("-dNOPAUSE")
        .arg("-dQUIET")
        .arg("-dBATCH")
        .arg(format!("-sOutputFile={}", output.display()))
        .arg(input)
        .output();

    match result {
        Ok(out) if out.status.success() => Ok(()),
        Ok(out) => Err(CompressError::Failed {
            tool: "gs",
            status: out.status,
            stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
        }),
        Err(source) => Err(CompressError::Launch { tool: "gs", source }),
    }
}

/// Recompress all streams in a PDF with lopdf.
pub fn compress_streams(bytes: &[u8]) -> Result<Vec<u8>, CompressError> {
    let mut doc = lopdf::Document::load_mem(bytes)?;
    doc.compress();

    let mut rewritten = Vec::with_capacity(bytes.len());
    doc.save_to(&mut rewritten)?;
    Ok(rewritten)
}

fn compress_in_process(
    input: &Path,
    output: &Path,
    original_bytes: u64,
) -> Result<CompressStats, CompressError> {
    let bytes = fs::read(input)?;
    let rewritten = compress_streams(&bytes)?;

    if rewritten.is_empty() || rewritten.len() as u64 >= original_bytes {
        log::info!("stream compression did not shrink the file; keeping original");
        if input != output {
            fs::copy(input, output)?;
        }
        return Ok(CompressStats {
            original_bytes,
            compressed_bytes: original_bytes,
        });
    }

    let staging = tempfile::Builder::new()
        .suffix(".pdf")
        .tempfile_in(parent_dir(output))?
        .into_temp_path();
    fs::write(&staging, &rewritten)?;

    let compressed_bytes = rewritten.len() as u64;
    staging.persist(output).map_err(|e| CompressError::Io(e.error))?;

    Ok(CompressStats {
        original_bytes,
        compressed_bytes,
    })
}

/// Staging directory for the output; the final rename must stay on one filesystem.
fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}
