use lopdf::Document as PdfDocument;
use tracing::{debug, warn};

use super::ExtractError;

/// Extracts the text of every page, concatenated in page-number order.
///
/// Loading the document is all-or-nothing: a corrupt or encrypted file is an
/// error. Individual pages are not: a page whose text cannot be decoded (scanned
/// images, exotic font encodings) is logged and contributes an empty string.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let doc = PdfDocument::load_mem(bytes)?;
    if doc.is_encrypted() {
        return Err(ExtractError::Encrypted);
    }

    let pages = doc.get_pages();
    let mut text = String::new();
    let mut skipped = 0usize;

    for &page_number in pages.keys() {
        match doc.extract_text(&[page_number]) {
            Ok(page_text) => text.push_str(&page_text),
            Err(e) => {
                skipped += 1;
                warn!(page = page_number, error = %e, "Page text could not be extracted, skipping");
            }
        }
    }

    debug!(pages = pages.len(), skipped, "PDF pages processed");
    Ok(text)
}
