//! Text extraction: turns an uploaded résumé (PDF or DOCX) into plain text.
//!
//! Binary parsing is delegated to `lopdf` (PDF) and `zip` + `quick-xml` (DOCX).
//! Unsupported formats yield an empty string rather than an error; only a document
//! that cannot be opened at all is reported as `ExtractError`.

pub mod docx;
pub mod pdf;

use std::path::Path;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Declared type of an uploaded document, classified by filename suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Pdf,
    Docx,
    Unsupported,
}

impl DocumentKind {
    /// Suffix match, ASCII case-insensitive. No content sniffing.
    pub fn from_filename(filename: &str) -> Self {
        let lower = filename.to_ascii_lowercase();
        if lower.ends_with(".pdf") {
            DocumentKind::Pdf
        } else if lower.ends_with(".docx") {
            DocumentKind::Docx
        } else {
            DocumentKind::Unsupported
        }
    }
}

/// An uploaded document: consumed once by `extract`, then dropped.
#[derive(Debug, Clone)]
pub struct Document {
    pub filename: String,
    pub kind: DocumentKind,
    pub bytes: Bytes,
}

impl Document {
    pub fn from_upload(filename: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let filename = filename.into();
        Document {
            kind: DocumentKind::from_filename(&filename),
            filename,
            bytes: bytes.into(),
        }
    }

    /// Reads a document from disk; the kind comes from the file name.
    pub fn open(path: &Path) -> Result<Self, ExtractError> {
        let bytes = std::fs::read(path)?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Document::from_upload(filename, bytes))
    }
}

/// Failures that make a document unreadable. All of them are fatal for the request.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("PDF could not be parsed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("PDF is encrypted")]
    Encrypted,

    #[error("DOCX package could not be opened: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("DOCX package has no word/document.xml part")]
    MissingBody,

    #[error("DOCX part {part} exceeds {limit} bytes")]
    PartTooLarge { part: String, limit: u64 },

    #[error("DOCX markup is malformed: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Extracts the plain text of a document.
///
/// Returns an empty string for unsupported formats. Callers should treat a
/// whitespace-only result the same way (see `has_text`).
pub fn extract(document: &Document) -> Result<String, ExtractError> {
    let text = match document.kind {
        DocumentKind::Pdf => pdf::extract_pdf_text(&document.bytes)?,
        DocumentKind::Docx => docx::extract_docx_text(&document.bytes)?,
        DocumentKind::Unsupported => {
            debug!(filename = %document.filename, "Unsupported document format");
            return Ok(String::new());
        }
    };

    info!(
        filename = %document.filename,
        kind = ?document.kind,
        bytes = document.bytes.len(),
        chars = text.chars().count(),
        "Document text extracted"
    );
    Ok(text)
}

/// False when extraction produced nothing but whitespace (e.g. a scanned PDF).
pub fn has_text(text: &str) -> bool {
    !text.trim().is_empty()
}
