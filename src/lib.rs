//! Traveler PDF field extraction and page-range reporting using lopdf
//!
//! This crate provides:
//! - Tolerant "Label: value" field extraction from per-page text
//! - Run-length compression of consecutive pages sharing a (Part, Asm) pair
//! - Per-page text extraction from traveler PDFs
//! - Filing helpers that sort processed PDFs into per-job folders

pub mod fields;
pub mod files;
pub mod pages;
pub mod ranges;

pub use fields::{extract_asm, extract_field, extract_job, extract_part, PageExtraction};
pub use pages::{page_texts, page_texts_mem};
pub use ranges::{compress, DocumentReport, RangeCompressor, RangeRecord};

use std::path::Path;

/// Summarize one traveler PDF into a document report.
///
/// Reads per-page text in page order and folds it through the range
/// compressor. Any page the PDF library cannot decode fails the whole
/// document; no partial report is produced.
pub fn summarize_pdf<P: AsRef<Path>>(path: P) -> Result<DocumentReport, ScanError> {
    Ok(ranges::compress(pages::page_texts(path)?))
}

/// Summarize a traveler PDF already loaded into memory.
pub fn summarize_pdf_mem(buffer: &[u8]) -> Result<DocumentReport, ScanError> {
    Ok(ranges::compress(pages::page_texts_mem(buffer)?))
}

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF parsing error: {0}")]
    Parse(String),
    #[error("PDF is encrypted")]
    Encrypted,
}

impl From<lopdf::Error> for ScanError {
    fn from(e: lopdf::Error) -> Self {
        ScanError::Parse(e.to_string())
    }
}
