//! Page text extraction backed by PDFium

use crate::error::{Error, Result};
use pdfium_render::prelude::*;
use std::path::Path;

/// Produces the text of every page of a PDF, in file order.
///
/// A page without extractable text yields an empty string rather than being
/// skipped, so the returned vector always has one entry per page.
pub trait TextExtractor: Send + Sync {
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>>;
}

/// Get PDFium instance (creates new instance each time - PDFium is not thread-safe)
fn create_pdfium() -> Result<Pdfium> {
    // Try to bind to system library or use static linking
    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| {
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(
                "/opt/pdfium/lib",
            ))
        })
        .or_else(|_| Pdfium::bind_to_system_library())
        .map_err(|e| Error::Pdfium {
            reason: format!("Failed to initialize PDFium: {}", e),
        })?;

    Ok(Pdfium::new(bindings))
}

/// Map PDFium errors to our error type
fn map_pdfium_error(err: PdfiumError) -> Error {
    match err {
        PdfiumError::PdfiumLibraryInternalError(PdfiumInternalError::PasswordError) => {
            Error::PasswordRequired
        }
        _ => Error::Pdfium {
            reason: format!("{}", err),
        },
    }
}

/// [`TextExtractor`] using the PDFium library
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfiumExtractor;

impl TextExtractor for PdfiumExtractor {
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>> {
        let data = std::fs::read(path)?;
        extract_page_texts(&data)
    }
}

/// Extract the text of every page from in-memory PDF data
pub fn extract_page_texts(data: &[u8]) -> Result<Vec<String>> {
    if data.len() < 4 || &data[0..4] != b"%PDF" {
        return Err(Error::InvalidPdf {
            reason: "Not a valid PDF file".to_string(),
        });
    }

    let pdfium = create_pdfium()?;
    let document = pdfium
        .load_pdf_from_byte_slice(data, None)
        .map_err(map_pdfium_error)?;

    let texts = document
        .pages()
        .iter()
        .map(|page| page.text().map(|text| text.all()).unwrap_or_default())
        .collect();

    Ok(texts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pdf_detection() {
        let result = extract_page_texts(b"not a pdf");
        assert!(matches!(result, Err(Error::InvalidPdf { .. })));
    }

    #[test]
    fn test_truncated_header_is_rejected() {
        let result = extract_page_texts(b"%PD");
        assert!(matches!(result, Err(Error::InvalidPdf { .. })));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = PdfiumExtractor.extract_pages(&dir.path().join("gone.pdf"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_non_pdf_file_is_rejected_before_binding() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.pdf");
        std::fs::write(&path, b"plain text pretending to be a pdf").unwrap();

        let result = PdfiumExtractor.extract_pages(&path);
        assert!(matches!(result, Err(Error::InvalidPdf { .. })));
    }
}
