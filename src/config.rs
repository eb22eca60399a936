//! Loader configuration

use crate::error::{Error, Result};
use std::path::PathBuf;

/// Environment variable holding the size ceiling in kilobytes
pub const MAX_PDF_SIZE_KB_VAR: &str = "MAX_PDF_SIZE_KB";
/// Environment variable holding the document root directory
pub const PDF_DIR_VAR: &str = "PDF_DIR";

pub const DEFAULT_MAX_PDF_SIZE_KB: u64 = 350;
pub const DEFAULT_PDF_DIR: &str = "./data/pdfs";

/// Immutable configuration for [`crate::loader::PdfLoader`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Directory that document identifiers are resolved against
    pub pdf_dir: PathBuf,
    /// Largest accepted file size in kilobytes
    pub max_size_kb: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            pdf_dir: PathBuf::from(DEFAULT_PDF_DIR),
            max_size_kb: DEFAULT_MAX_PDF_SIZE_KB,
        }
    }
}

impl LoaderConfig {
    pub fn new(pdf_dir: impl Into<PathBuf>, max_size_kb: u64) -> Self {
        Self {
            pdf_dir: pdf_dir.into(),
            max_size_kb,
        }
    }

    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup, falling back to defaults
    /// for unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_size_kb = match lookup(MAX_PDF_SIZE_KB_VAR) {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map_err(|_| Error::InvalidConfig {
                    key: MAX_PDF_SIZE_KB_VAR.to_string(),
                    value,
                })?,
            None => DEFAULT_MAX_PDF_SIZE_KB,
        };

        let pdf_dir = lookup(PDF_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PDF_DIR));

        Ok(Self {
            pdf_dir,
            max_size_kb,
        })
    }
}
