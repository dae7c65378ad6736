//! MCP command: serve rhyme lookups over stdio.

use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use tracing::{info, instrument};

use rifma_core::Config;

use crate::server::ProjectServer;

/// Arguments for the `mcp` subcommand.
#[derive(Args, Debug, Default)]
pub struct McpArgs {}

/// Run the MCP server until the client disconnects.
#[instrument(name = "cmd_mcp", skip_all)]
pub async fn cmd_mcp(_args: McpArgs, config: Config) -> anyhow::Result<()> {
    let service = tokio::task::spawn_blocking(move || super::open_service(&config))
        .await
        .context("index loading task panicked")??;

    info!("starting MCP server on stdio");
    let running = ProjectServer::new(Arc::new(service))
        .serve(stdio())
        .await
        .context("failed to start MCP server")?;
    running.waiting().await.context("MCP server error")?;
    info!("MCP server stopped");
    Ok(())
}
