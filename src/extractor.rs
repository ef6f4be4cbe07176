// src/extractor.rs

use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Opaque failure from the PDF library; the document is malformed or
    /// uses features the extractor cannot handle.
    #[error("failed to parse document: {0}")]
    Parse(String),
    #[error("document is not valid UTF-8")]
    Encoding,
}

/// Turns raw document bytes into unsegmented text.
///
/// Handlers resolve one of these per upload; tests substitute fakes.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}

/// PDF extraction backed by the `pdf-extract` crate.
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ExtractionError::Parse(e.to_string()))
    }
}

/// Passthrough for plain-text uploads.
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        String::from_utf8(bytes.to_vec()).map_err(|_| ExtractionError::Encoding)
    }
}

/// Picks an extractor from the uploaded filename's extension.
/// Returns `None` for anything other than `.pdf` / `.txt`.
pub fn for_filename(filename: &str) -> Option<&'static dyn TextExtractor> {
    static PDF: PdfTextExtractor = PdfTextExtractor;
    static TEXT: PlainTextExtractor = PlainTextExtractor;

    let ext = Path::new(filename)
        .extension()
        .and_then(|s| s.to_str())?
        .to_ascii_lowercase();
    match ext.as_str() {
        "pdf" => Some(&PDF),
        "txt" => Some(&TEXT),
        _ => None,
    }
}
