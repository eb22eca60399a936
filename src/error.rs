//! Error types for the document server

use thiserror::Error;

/// Result type alias for the document server
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the document server
#[derive(Error, Debug)]
pub enum Error {
    /// Caller input or file characteristics violate a precondition
    #[error("{reason}")]
    Validation { reason: String },

    /// Referenced document is missing or cannot be read
    #[error("{reason}")]
    Load { reason: String },

    /// Invalid PDF file
    #[error("Invalid PDF file: {reason}")]
    InvalidPdf { reason: String },

    /// PDF is password protected
    #[error("PDF is password protected")]
    PasswordRequired,

    /// PDFium error
    #[error("PDFium error: {reason}")]
    Pdfium { reason: String },

    /// Configuration value could not be parsed
    #[error("Invalid value for {key}: {value:?}")]
    InvalidConfig { key: String, value: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn validation(reason: impl Into<String>) -> Self {
        Error::Validation {
            reason: reason.into(),
        }
    }

    pub fn load(reason: impl Into<String>) -> Self {
        Error::Load {
            reason: reason.into(),
        }
    }

    /// True for failures the caller could have prevented (bad name, extension, size)
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }

    /// True for not-found and unreadable-document failures
    pub fn is_load(&self) -> bool {
        matches!(self, Error::Load { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loader_errors_display_reason_verbatim() {
        let err = Error::validation("Invalid filename - path traversal not allowed");
        assert_eq!(
            err.to_string(),
            "Invalid filename - path traversal not allowed"
        );
        assert!(err.is_validation());
        assert!(!err.is_load());

        let err = Error::load("PDF not found: missing.pdf");
        assert_eq!(err.to_string(), "PDF not found: missing.pdf");
        assert!(err.is_load());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_invalid_config_display() {
        let err = Error::InvalidConfig {
            key: "MAX_PDF_SIZE_KB".to_string(),
            value: "lots".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid value for MAX_PDF_SIZE_KB: \"lots\"");
    }
}
