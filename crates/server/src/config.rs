use anyhow::{Context, Result};
use hearsay_core::AppConfig;
use hearsay_mcp::{build_registry, McpServer, ToolRegistry};
use std::path::Path;

/// Load the application configuration, with environment overrides applied
pub fn load(config_path: &Path) -> Result<AppConfig> {
    AppConfig::load(config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))
}

/// Shared state for the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub mcp: McpServer,
}

impl AppState {
    /// Build every tool client from `config`. Fails on missing credentials.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let registry = build_registry(config)?;
        tracing::info!("Registered {} tools", registry.len());
        Ok(Self::from_registry(registry))
    }

    pub fn from_registry(registry: ToolRegistry) -> Self {
        Self {
            mcp: McpServer::new(registry),
        }
    }
}
