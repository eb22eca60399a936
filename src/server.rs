//! MCP Server implementation using rmcp

use crate::config::LoaderConfig;
use crate::loader::PdfLoader;
use anyhow::Result;
use rmcp::{
    handler::server::tool::ToolRouter, handler::server::wrapper::Parameters, model::*,
    schemars::JsonSchema, service::RequestContext, tool, tool_handler, tool_router, RoleServer,
    ServerHandler, ServiceExt,
};
use serde::Deserialize;
use std::sync::Arc;

/// Name reported to clients during initialization
pub const SERVER_NAME: &str = "DocumentMCP";

/// URI of the document listing resource
pub const DOCUMENTS_URI: &str = "docs://documents";
/// URI template of the per-document text resource
pub const DOCUMENT_URI_TEMPLATE: &str = "docs://documents/{doc_id}";
const DOCUMENT_URI_PREFIX: &str = "docs://documents/";

/// Returned by `list_available_pdfs` when the directory holds no documents
pub const NO_DOCUMENTS_MESSAGE: &str = "No PDF files are currently available in the directory.";
const LISTING_HEADER: &str = "Available PDF files:";

/// Document MCP Server
#[derive(Clone)]
pub struct DocumentServer {
    loader: Arc<PdfLoader>,
    tool_router: ToolRouter<Self>,
}

// ============================================================================
// Request types
// ============================================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ReadDocParams {
    /// PDF filename to read
    pub doc_id: String,
}

// ============================================================================
// Tool implementations
// ============================================================================

#[tool_router]
impl DocumentServer {
    /// Create a server whose loader extracts text with PDFium
    pub fn new(config: LoaderConfig) -> Self {
        Self::with_loader(PdfLoader::new(config))
    }

    /// Create a server around an existing loader
    pub fn with_loader(loader: PdfLoader) -> Self {
        Self {
            loader: Arc::new(loader),
            tool_router: Self::tool_router(),
        }
    }

    /// Read the text of a PDF document
    #[tool(
        name = "read_doc_contents",
        description = "Read the contents of a PDF document and return it as a string."
    )]
    async fn read_doc_contents(
        &self,
        Parameters(params): Parameters<ReadDocParams>,
    ) -> Result<CallToolResult, ErrorData> {
        Ok(self.process_read_doc_contents(&params.doc_id).await)
    }

    /// List the PDF documents that can be read
    #[tool(
        name = "list_available_pdfs",
        description = "List all available PDF documents that can be read."
    )]
    async fn list_available_pdfs(&self) -> String {
        self.process_list_available_pdfs().await
    }
}

impl DocumentServer {
    pub fn loader(&self) -> &PdfLoader {
        &self.loader
    }

    /// Body of the `read_doc_contents` tool. Loader failures become an error
    /// result rather than a protocol error.
    pub async fn process_read_doc_contents(&self, doc_id: &str) -> CallToolResult {
        match self.loader.load(doc_id).await {
            Ok(text) => CallToolResult::success(vec![Content::text(text)]),
            Err(e) => {
                tracing::warn!(error = %e, doc_id, "read_doc_contents failed");
                CallToolResult::error(vec![Content::text(format!(
                    "Failed to read document {}: {}",
                    doc_id, e
                ))])
            }
        }
    }

    /// Body of the `list_available_pdfs` tool
    pub async fn process_list_available_pdfs(&self) -> String {
        format_listing(&self.list_documents().await)
    }

    /// Directory scan on the blocking thread pool
    async fn list_documents(&self) -> Vec<String> {
        let loader = Arc::clone(&self.loader);
        tokio::task::spawn_blocking(move || loader.list_available())
            .await
            .unwrap_or_else(|e| {
                tracing::error!(error = %e, "document listing task failed");
                Vec::new()
            })
    }

    /// Resolve a `docs://` URI to its contents
    pub async fn process_read_resource(
        &self,
        uri: &str,
    ) -> Result<ReadResourceResult, ErrorData> {
        if uri == DOCUMENTS_URI {
            let names = self.list_documents().await;
            let text = serde_json::to_string(&names).map_err(|e| {
                tracing::error!(error = %e, "failed to encode document listing");
                ErrorData::internal_error("Failed to encode document listing", None)
            })?;

            return Ok(ReadResourceResult {
                contents: vec![ResourceContents::TextResourceContents {
                    uri: uri.to_string(),
                    mime_type: Some("application/json".to_string()),
                    text,
                    meta: Default::default(),
                }],
            });
        }

        let segment = match uri.strip_prefix(DOCUMENT_URI_PREFIX) {
            Some(segment) if !segment.is_empty() => segment,
            _ => {
                return Err(ErrorData::resource_not_found(
                    format!("Unknown resource: {}", uri),
                    None,
                ))
            }
        };

        // Clients expand the template per RFC 6570, so reserved characters arrive encoded
        let doc_id = urlencoding::decode(segment).map_err(|_| {
            ErrorData::invalid_params(
                format!("Failed to fetch document {}: identifier is not valid UTF-8", segment),
                None,
            )
        })?;
        let doc_id = doc_id.as_ref();

        match self.loader.load(doc_id).await {
            Ok(text) => Ok(ReadResourceResult {
                contents: vec![ResourceContents::TextResourceContents {
                    uri: uri.to_string(),
                    mime_type: Some("text/plain".to_string()),
                    text,
                    meta: Default::default(),
                }],
            }),
            Err(e) => {
                tracing::warn!(error = %e, doc_id, "read_resource failed");
                Err(ErrorData::invalid_params(
                    format!("Failed to fetch document {}: {}", doc_id, e),
                    None,
                ))
            }
        }
    }

    fn documents_resource() -> Resource {
        let mut resource = RawResource::new(DOCUMENTS_URI, "documents");
        resource.mime_type = Some("application/json".to_string());
        resource.description = Some("Names of the PDF documents that can be read".to_string());

        Annotated {
            raw: resource,
            annotations: None,
        }
    }

    fn document_template() -> ResourceTemplate {
        Annotated {
            raw: RawResourceTemplate {
                uri_template: DOCUMENT_URI_TEMPLATE.to_string(),
                name: "document".to_string(),
                title: None,
                description: Some("Extracted text of a PDF document".to_string()),
                mime_type: Some("text/plain".to_string()),
                icons: None,
            },
            annotations: None,
        }
    }
}

/// Format a document listing for display
pub fn format_listing(names: &[String]) -> String {
    if names.is_empty() {
        return NO_DOCUMENTS_MESSAGE.to_string();
    }

    let lines: Vec<String> = names.iter().map(|name| format!("- {}", name)).collect();
    format!("{}\n{}", LISTING_HEADER, lines.join("\n"))
}

#[tool_handler]
impl ServerHandler for DocumentServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                ..Implementation::from_build_env()
            },
            instructions: Some(
                "Document MCP Server lists the PDF documents in its configured directory \
                 and returns their text. Documents are addressed by bare filename, either \
                 through the read_doc_contents tool or the docs://documents/{doc_id} resource."
                    .into(),
            ),
        }
    }

    /// List the static document listing resource
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, ErrorData> {
        Ok(ListResourcesResult {
            resources: vec![Self::documents_resource()],
            next_cursor: None,
            meta: Default::default(),
        })
    }

    /// List the per-document resource template
    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, ErrorData> {
        Ok(ListResourceTemplatesResult {
            resource_templates: vec![Self::document_template()],
            next_cursor: None,
            meta: Default::default(),
        })
    }

    /// Read the listing or a document's text
    async fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, ErrorData> {
        self.process_read_resource(&request.uri).await
    }
}

/// Run the MCP server over stdio with configuration from the environment
pub async fn run_server() -> Result<()> {
    run_server_with_config(LoaderConfig::from_env()?).await
}

/// Run the MCP server over stdio with the given configuration
pub async fn run_server_with_config(config: LoaderConfig) -> Result<()> {
    let server = DocumentServer::new(config);

    let config = server.loader().config();
    tracing::info!(
        pdf_dir = %config.pdf_dir.display(),
        max_size_kb = config.max_size_kb,
        "Document MCP Server ready, waiting for connections..."
    );

    let service = server.serve(rmcp::transport::io::stdio()).await?;
    service.waiting().await?;

    Ok(())
}
