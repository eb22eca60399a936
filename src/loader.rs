//! Document loader: filename validation, size ceiling, text extraction

use crate::config::LoaderConfig;
use crate::error::{Error, Result};
use crate::pdf::{PdfiumExtractor, TextExtractor};
use std::path::Path;
use std::sync::Arc;

/// Separator placed between the text of consecutive pages
pub const PAGE_SEPARATOR: &str = "\n\n";

/// Filename pattern used when listing documents (case-sensitive)
const LIST_PATTERN: &str = "*.pdf";

/// Lists and reads PDF documents from a single configured directory.
///
/// Holds only immutable state and is meant to be shared behind an `Arc` for the
/// lifetime of the process.
#[derive(Clone)]
pub struct PdfLoader {
    config: LoaderConfig,
    extractor: Arc<dyn TextExtractor>,
}

impl std::fmt::Debug for PdfLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfLoader")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl PdfLoader {
    /// Create a loader that extracts text with PDFium
    pub fn new(config: LoaderConfig) -> Self {
        Self::with_extractor(config, Arc::new(PdfiumExtractor))
    }

    /// Create a loader with a custom text extraction backend
    pub fn with_extractor(config: LoaderConfig, extractor: Arc<dyn TextExtractor>) -> Self {
        Self { config, extractor }
    }

    /// Configuration the loader was built with
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// List PDF filenames in the configured directory, sorted ascending.
    ///
    /// A missing directory is not an error; it simply has no documents.
    pub fn list_available(&self) -> Vec<String> {
        let dir = &self.config.pdf_dir;
        if !dir.exists() {
            return Vec::new();
        }

        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!(error = %e, "document directory is not readable");
                return Vec::new();
            }
        };

        let Ok(pattern) = glob::Pattern::new(LIST_PATTERN) else {
            return Vec::new();
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| pattern.matches(name))
            .collect();
        names.sort();

        tracing::debug!(count = names.len(), "listed documents");
        names
    }

    /// Extract the text of the named document.
    ///
    /// Checks run in a fixed order: separators in the name, existence,
    /// extension, size. Only then is the file opened for extraction, which
    /// happens on the blocking thread pool.
    pub async fn load(&self, doc_id: &str) -> Result<String> {
        // Purely lexical; nothing touches the filesystem before this passes
        if doc_id.contains('/') || doc_id.contains('\\') {
            return Err(Error::validation(
                "Invalid filename - path traversal not allowed",
            ));
        }

        let path = self.config.pdf_dir.join(doc_id);

        if !path.exists() {
            return Err(Error::load(format!("PDF not found: {}", doc_id)));
        }

        if !has_pdf_extension(&path) {
            return Err(Error::validation(format!("File must be a PDF: {}", doc_id)));
        }

        let size_bytes = std::fs::metadata(&path)
            .map_err(|e| Error::load(format!("Failed to read PDF {}: {}", doc_id, e)))?
            .len();
        let size_kb = size_bytes as f64 / 1024.0;
        if size_kb > self.config.max_size_kb as f64 {
            return Err(Error::validation(format!(
                "PDF too large: {:.1}KB > {}KB",
                size_kb, self.config.max_size_kb
            )));
        }

        // Move CPU-heavy PDF work to blocking thread pool
        let extractor = Arc::clone(&self.extractor);
        let pages = tokio::task::spawn_blocking(move || extractor.extract_pages(&path))
            .await
            .map_err(|e| Error::load(format!("Failed to read PDF {}: {}", doc_id, e)))?
            .map_err(|e| Error::load(format!("Failed to read PDF {}: {}", doc_id, e)))?;

        tracing::debug!(doc_id, pages = pages.len(), "extracted document text");

        Ok(pages.join(PAGE_SEPARATOR))
    }
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}
