//! Serve command: the rhyme endpoint over HTTP.

use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use tokio::net::TcpListener;
use tracing::{info, instrument};

use rifma_core::Config;

use crate::http::build_router;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Listen address (overrides `bind`, default 0.0.0.0:5000).
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<String>,
}

/// Load the index and serve `POST /api/rhyme` until Ctrl-C.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(args: ServeArgs, config: Config) -> anyhow::Result<()> {
    let bind = args.bind.unwrap_or_else(|| config.bind.clone());

    let service = tokio::task::spawn_blocking(move || super::open_service(&config))
        .await
        .context("index loading task panicked")??;

    let listener = TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    info!(addr = %bind, "listening");

    axum::serve(listener, build_router(Arc::new(service)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
