//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol. The server exposes tools only; each tool route carries a
//! reference to the single MISP connection established at startup.

use rmcp::{
    ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler,
};
use std::sync::Arc;

use super::config::Config;
use crate::domains::misp::MispConnection;
use crate::domains::tools::build_tool_router;

/// The main MCP server handler.
///
/// Implements the `ServerHandler` trait from rmcp; tool calls are routed
/// through the ToolRouter built in `domains/tools/router.rs`.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// The single MISP connection shared by every tool.
    connection: Arc<MispConnection>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration and the
    /// connection established (or not) at startup.
    pub fn new(config: Config, connection: MispConnection) -> Self {
        let config = Arc::new(config);
        let connection = Arc::new(connection);

        Self {
            tool_router: build_tool_router::<Self>(connection.clone()),
            config,
            connection,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Whether a MISP connection was established at startup.
    pub fn is_connected(&self) -> bool {
        self.connection.is_ready()
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "This server bridges MCP clients to a MISP threat-intelligence instance. \
                 It provides tools to check connectivity, search events, create events, \
                 and attach attributes (IOCs). Every tool returns a {result, text} \
                 envelope; a missing result with an 'error:' text marks a failure."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_reports_config_identity() {
        let server = McpServer::new(Config::default(), MispConnection::absent());
        assert_eq!(server.name(), "misp-mcp-server");
        assert_eq!(server.version(), env!("CARGO_PKG_VERSION"));
        assert!(!server.is_connected());
    }

    #[test]
    fn test_server_advertises_tools_capability() {
        let server = McpServer::new(Config::default(), MispConnection::absent());
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
    }
}
