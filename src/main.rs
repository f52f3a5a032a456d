//! MCP Server Entry Point
//!
//! This is the main entry point for the MCP server. It initializes
//! logging, loads configuration, attempts the single MISP connection,
//! and starts the server with the configured transport.

use anyhow::Result;
use tracing::{Level, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use misp_mcp_server::core::{Config, McpServer, TransportService};
use misp_mcp_server::domains::misp::MispConnection;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let config = Config::from_env();

    // Initialize logging
    init_logging(&config.logging.level);

    info!("Starting {} v{}", config.server.name, config.server.version);

    // One connection attempt; a failure degrades every tool to the
    // "not initialized" envelope instead of preventing startup.
    let connection = MispConnection::initialize(&config.misp);
    if !connection.is_ready() {
        warn!("Running without a MISP connection");
    }

    let transport = TransportService::new(config.transport.clone());
    let server = McpServer::new(config, connection);

    info!("Server initialized");

    transport.run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Configures tracing with the specified log level and format.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
