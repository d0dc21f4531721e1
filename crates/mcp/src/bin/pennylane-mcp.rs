// Standalone MCP server binary

use anyhow::{Context, Result};
use clap::Parser;
use pennylane_mcp::config::{API_KEY_ENV, BASE_URL_ENV, TIMEOUT_ENV};
use pennylane_mcp::{build_registry, Dispatcher, McpServer, ServerConfig};
use pennylane_sdk::DEFAULT_BASE_URL;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "pennylane-mcp")]
#[command(about = "MCP server for the Pennylane accounting API", long_about = None)]
struct Args {
    /// Pennylane API key
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    api_key: Option<String>,

    /// Root URL of the Pennylane external API
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Per-request timeout, in seconds
    #[arg(long, env = TIMEOUT_ENV, default_value_t = 30)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Values already in the environment win over .env
    dotenvy::dotenv().ok();

    // stdout carries protocol frames, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pennylane_mcp=info,pennylane_sdk=info".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();

    let config = ServerConfig::new(
        args.api_key,
        &args.base_url,
        Duration::from_secs(args.timeout_secs),
    )
    .context("Invalid configuration")?;

    tracing::info!("Pennylane MCP server starting...");
    tracing::info!("API base URL: {}", config.client_config().base_url());

    let client = config.build_client().context("Failed to create Pennylane client")?;

    let result = serve(client.clone()).await;
    client.close();
    tracing::info!("Pennylane MCP server stopped");

    match result? {
        Shutdown::Eof => Ok(()),
        // The pending stdin read lives on a blocking thread that runtime
        // shutdown would wait on until the next line or EOF
        Shutdown::Interrupted => std::process::exit(0),
    }
}

/// How the stdio session ended.
enum Shutdown {
    Eof,
    Interrupted,
}

async fn serve(client: pennylane_sdk::PennylaneClient) -> Result<Shutdown> {
    let registry = build_registry(client).context("Tool catalog is inconsistent")?;
    tracing::info!("Registered {} tools", registry.len());

    let server = McpServer::new(Dispatcher::new(registry));

    tokio::select! {
        result = server.run_stdio() => {
            result.context("MCP server failed")?;
            Ok(Shutdown::Eof)
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted, shutting down");
            Ok(Shutdown::Interrupted)
        }
    }
}
