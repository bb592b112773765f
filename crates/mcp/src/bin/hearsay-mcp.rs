// Standalone MCP server binary (stdio transport)

use anyhow::{Context, Result};
use hearsay_core::AppConfig;
use hearsay_mcp::{build_registry, McpServer};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries protocol messages, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hearsay=info,hearsay_mcp=info,hearsay_sdk=info".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::info!("Hearsay MCP server starting...");

    let config_path = std::env::var("HEARSAY_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("hearsay.toml"));
    let config = AppConfig::load(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;

    let registry = build_registry(&config)?;
    tracing::info!("Registered {} tools", registry.len());

    let server = McpServer::new(registry);
    server.start().await?;

    Ok(())
}
