//! Per-page plain-text extraction using lopdf
//!
//! Travelers are machine-generated text PDFs, so lopdf's content-stream
//! text extraction is enough. Pages come back in ascending page-number
//! order, one string per page, possibly empty for pages with no text.

use std::path::Path;

use lopdf::Document;

use crate::ScanError;

/// Extract per-page text from a PDF file.
pub fn page_texts<P: AsRef<Path>>(path: P) -> Result<Vec<String>, ScanError> {
    let doc = Document::load(path)?;
    page_texts_from_doc(&doc)
}

/// Extract per-page text from a PDF memory buffer.
pub fn page_texts_mem(buffer: &[u8]) -> Result<Vec<String>, ScanError> {
    let doc = Document::load_mem(buffer)?;
    page_texts_from_doc(&doc)
}

/// Extract per-page text from a loaded document.
fn page_texts_from_doc(doc: &Document) -> Result<Vec<String>, ScanError> {
    if doc.is_encrypted() {
        return Err(ScanError::Encrypted);
    }

    let pages = doc.get_pages();
    let mut texts = Vec::with_capacity(pages.len());

    for (&number, _) in pages.iter() {
        // Any page failing to decode aborts the whole document; a report
        // built from partial text could misstate the ranges.
        let text = doc.extract_text(&[number])?;
        if text.trim().is_empty() {
            log::debug!("page {} has no extractable text", number);
        }
        texts.push(text);
    }

    Ok(texts)
}
