//! Transport service - orchestrates the configured transport.
//!
//! This service provides a unified interface for starting the MCP server
//! with either transport mechanism.

use rmcp::ServiceExt;
use tracing::info;

use super::{TransportConfig, TransportError, TransportResult};
use crate::core::McpServer;

/// Transport service - manages the transport layer for the MCP server.
pub struct TransportService {
    config: TransportConfig,
}

impl TransportService {
    /// Create a new transport service with the given configuration.
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }

    /// Create a transport service from environment variables.
    pub fn from_env() -> Self {
        Self::new(TransportConfig::from_env())
    }

    /// Get the transport configuration.
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Start the transport with the given MCP server.
    ///
    /// This method blocks until the transport is shut down.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        info!("Starting transport: {}", self.config.description());

        match self.config {
            #[cfg(feature = "stdio")]
            TransportConfig::Stdio => run_stdio(server).await,
            #[cfg(feature = "tcp")]
            TransportConfig::Tcp(cfg) => run_tcp(cfg, server).await,
        }
    }
}

/// Run the STDIO transport until the client disconnects.
#[cfg(feature = "stdio")]
async fn run_stdio(server: McpServer) -> TransportResult<()> {
    info!("Ready - communicating via stdin/stdout");

    let service = server
        .serve(rmcp::transport::stdio())
        .await
        .map_err(|e| TransportError::init(e.to_string()))?;

    service
        .waiting()
        .await
        .map_err(|e| TransportError::ServiceError(e.to_string()))?;

    info!("STDIO transport finished");
    Ok(())
}

/// Run the TCP transport, serving each accepted connection in its own task.
#[cfg(feature = "tcp")]
async fn run_tcp(config: super::config::TcpConfig, server: McpServer) -> TransportResult<()> {
    use tokio::net::TcpListener;
    use tracing::warn;

    let addr = format!("{}:{}", config.host, config.port);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| TransportError::bind(&addr, e))?;

    info!("Ready - listening on {} (JSON-RPC over TCP)", addr);

    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                info!("Accepted connection from {}", peer_addr);

                if let Err(e) = stream.set_nodelay(true) {
                    warn!("Failed to set TCP_NODELAY for {}: {}", peer_addr, e);
                }

                let server = server.clone();
                tokio::spawn(async move {
                    match server.serve(stream).await {
                        Ok(service) => {
                            if let Err(e) = service.waiting().await {
                                warn!("Error while serving client {}: {}", peer_addr, e);
                            } else {
                                info!("Client {} disconnected cleanly", peer_addr);
                            }
                        }
                        Err(e) => warn!("Failed to initialize service for {}: {}", peer_addr, e),
                    }
                });
            }
            Err(e) => {
                warn!("Failed to accept connection: {}", e);
                tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
            }
        }
    }
}
