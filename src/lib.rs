//! Document MCP Server Library
//!
//! Exposes the PDF documents of a single directory over MCP:
//! - `read_doc_contents`: Extract the text of a named PDF
//! - `list_available_pdfs`: List the PDFs that can be read
//! - `docs://documents`: The same listing as a JSON resource
//! - `docs://documents/{doc_id}`: A PDF's text as a resource

pub mod config;
pub mod error;
pub mod loader;
pub mod pdf;
pub mod server;

pub use config::LoaderConfig;
pub use error::{Error, Result};
pub use loader::PdfLoader;
pub use server::{
    format_listing, run_server, run_server_with_config, DocumentServer, ReadDocParams,
};
