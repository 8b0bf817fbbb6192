//! PDF text extraction
//!
//! Wraps the pdf-extract crate. Pages without extractable text (scanned
//! or image-only pages) contribute empty strings; only whole-document
//! failures are errors.

use crate::error::AppError;
use std::path::Path;

/// Extract the concatenated text of all pages from PDF bytes.
///
/// Returns an error for non-PDF input, encrypted documents, or anything
/// the decoder cannot read at all.
pub fn extract_text_from_bytes(pdf_bytes: &[u8]) -> Result<String, AppError> {
    // Validate PDF magic bytes before handing off to the decoder
    if pdf_bytes.len() < 4 || &pdf_bytes[0..4] != b"%PDF" {
        return Err(AppError::Extraction("not a valid PDF".to_string()));
    }

    pdf_extract::extract_text_from_mem(pdf_bytes)
        .map_err(|e| AppError::Extraction(format!("{}", e)))
}

/// Extract text from a PDF file on disk
pub fn extract_text(path: &Path) -> Result<String, AppError> {
    let bytes = std::fs::read(path)?;
    extract_text_from_bytes(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_rejects_non_pdf_bytes() {
        let err = extract_text_from_bytes(b"hello world").unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }

    #[test]
    fn test_rejects_truncated_magic() {
        let err = extract_text_from_bytes(b"%PD").unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = extract_text(Path::new("/nonexistent/file.pdf")).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }

    #[test]
    fn test_file_without_magic_is_extraction_error() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"plain text, not a pdf").unwrap();
        let err = extract_text(tmp.path()).unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }
}
