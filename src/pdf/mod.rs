//! PDF processing layer
//!
//! This module provides page text extraction using PDFium.

mod reader;

pub use reader::{extract_page_texts, PdfiumExtractor, TextExtractor};
