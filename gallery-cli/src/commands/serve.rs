//! HTTP server command
//!
//! Runs the painting API until Ctrl+C or SIGTERM.

use anyhow::{Context, Result};
use clap::Parser;
use gallery_core::GalleryConfig;
use gallery_server::db::create_pool_with_options;
use gallery_server::{run_server, ServerConfig};
use std::net::SocketAddr;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (overrides config and GALLERY_BIND; default 127.0.0.1:7070)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Maximum pooled database connections
    #[arg(long)]
    pub max_connections: Option<u32>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, mut config: GalleryConfig) -> Result<()> {
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(max) = args.max_connections {
        config.max_connections = max;
    }
    if let Some(timeout) = args.timeout {
        config.request_timeout_secs = timeout;
    }
    config.cors_permissive |= args.cors_permissive;
    config.validate()?;

    tracing::info!(
        database = %config.database_path.display(),
        max_connections = config.max_connections,
        "Starting gallery server on {}",
        config.bind_addr
    );

    let pool = create_pool_with_options(&config.database_path, config.max_connections)
        .await
        .context("Failed to create database pool")?;

    let server_config = ServerConfig::from(&config);

    // Blocks until shutdown; the server closes the pool on the way out
    run_server(pool, server_config)
        .await
        .context("Server error")?;

    Ok(())
}
