// Standalone MCP server binary

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use trello_mcp::config::{ConfigOverrides, McpConfig};
use trello_mcp::resources::ResourceProvider;
use trello_mcp::server::McpServer;
use trello_mcp::tools::{trello_registry, BatchPolicy};
use trello_sdk::RemoteApi;

#[derive(Parser, Debug)]
#[command(name = "trello-mcp")]
#[command(about = "MCP server for Trello boards, lists and cards", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "trello-mcp.toml")]
    config: PathBuf,

    /// Trello API key
    #[arg(long, env = "TRELLO_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Trello API token
    #[arg(long, env = "TRELLO_API_TOKEN", hide_env_values = true)]
    api_token: Option<String>,

    /// Trello API root
    #[arg(long, env = "TRELLO_BASE_URL")]
    base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "TRELLO_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// How batch tools report failed items (all-or-nothing, partial-success)
    #[arg(long, env = "TRELLO_BATCH_POLICY")]
    batch_policy: Option<BatchPolicy>,

    /// Ignored; the server only speaks stdio
    #[arg(long, env = "PORT")]
    port: Option<u16>,
}

impl From<&Args> for ConfigOverrides {
    fn from(args: &Args) -> Self {
        Self {
            api_key: args.api_key.clone(),
            api_token: args.api_token.clone(),
            base_url: args.base_url.clone(),
            timeout_secs: args.timeout_secs,
            batch_policy: args.batch_policy,
            port: args.port,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env values only fill variables that are not already set
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // stdout carries the protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::info!("Trello MCP Server starting...");

    let config = McpConfig::load(&args.config)?.apply(ConfigOverrides::from(&args));

    if !config.credentials().is_configured() {
        tracing::warn!("TRELLO_API_KEY or TRELLO_API_TOKEN is not set; Trello calls will fail");
    }
    if let Some(port) = config.server.port {
        tracing::debug!(port, "Ignoring port, serving on stdio");
    }

    let api: Arc<dyn RemoteApi> = Arc::new(config.build_client()?);

    let registry = trello_registry(api.clone(), config.server.batch_policy)?;
    tracing::info!(
        batch_policy = %config.server.batch_policy,
        "Registered {} tools",
        registry.len()
    );

    let server = McpServer::new(registry, ResourceProvider::new(api));
    server.start().await?;

    Ok(())
}
