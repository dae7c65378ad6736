//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes rhyme lookups to AI assistants over stdio. The server wraps the
//! same [`RhymeService`] as the HTTP endpoint and the CLI, so lookups share
//! one index and one cache.

use std::sync::Arc;

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};

use rifma_core::RhymeService;

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the `find_rhymes` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct FindRhymesParams {
    /// Russian word to rhyme (case and surrounding whitespace are ignored).
    pub word: String,
}

/// MCP server backed by a loaded rhyme index.
#[derive(Clone)]
pub struct ProjectServer {
    service: Arc<RhymeService>,
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
}

#[tool_router]
impl ProjectServer {
    /// Create a server over an opened rhyme service.
    pub fn new(service: Arc<RhymeService>) -> Self {
        Self {
            service,
            tool_router: Self::tool_router(),
        }
    }

    /// Get project information.
    #[tool(description = "Get project name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "analyzer": self.service.normalizer().analyzer_name(),
            "suffixes": self.service.index().len(),
        });

        let text = if params.format == "json" {
            serde_json::to_string_pretty(&info)
                .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?
        } else {
            format!(
                "{} v{}\n{}\n{} suffixes indexed ({} analyzer)",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
                self.service.index().len(),
                self.service.normalizer().analyzer_name(),
            )
        };

        tracing::info!(tool = "get_info", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Find rhymes for a word.
    #[tool(
        description = "Find Russian rhymes for a word. Returns the normalized form and the sorted list of words sharing its ending."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", word = %params.word))]
    fn find_rhymes(
        &self,
        Parameters(params): Parameters<FindRhymesParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "find_rhymes", "executing MCP tool");

        let report = self
            .service
            .lookup(&params.word)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

        let json = serde_json::to_string_pretty(&*report)
            .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;

        tracing::info!(tool = "find_rhymes", count = report.count, "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

#[tool_handler]
impl ServerHandler for ProjectServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Call find_rhymes with a Russian word to get words that rhyme with it.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}
