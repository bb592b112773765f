use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod api;
mod config;

use config::AppState;

#[derive(Parser, Debug)]
#[command(name = "hearsay")]
#[command(about = "Reddit and events tools for agents, served over MCP", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "HEARSAY_CONFIG", default_value = "hearsay.toml")]
    config: PathBuf,

    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hearsay=info,hearsay_mcp=info,hearsay_sdk=info,tower_http=debug".into()),
        )
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    let args = Args::parse();

    tracing::info!("Starting Hearsay");
    tracing::info!("Configuration file: {}", args.config.display());

    // Load configuration and build the tool clients
    let app_config = config::load(&args.config)?;
    let state = AppState::new(&app_config)?;

    // Start API server
    let addr = format!("{}:{}", args.host, args.port);
    tracing::info!("Starting API server on {}", addr);

    api::serve(&addr, state).await?;

    Ok(())
}
