//! MISP MCP Server Library
//!
//! This crate provides a Model Context Protocol (MCP) server that bridges
//! agents to a MISP threat-intelligence instance.
//!
//! # Architecture
//!
//! - **core**: Configuration, the main server handler, and the transport layer
//! - **domains**: Business logic organized by bounded contexts
//!   - **misp**: connection lifecycle, REST client, capability probing
//!   - **tools**: the MCP tool surface (ping, search_events, add_event,
//!     add_attribute) and the uniform result envelope
//!
//! # Example
//!
//! ```rust,no_run
//! use misp_mcp_server::{core::Config, core::McpServer};
//! use misp_mcp_server::domains::misp::MispConnection;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let connection = MispConnection::initialize(&config.misp);
//!     let server = McpServer::new(config, connection);
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, McpServer};
pub use domains::misp::{MispConnection, MispError};
pub use domains::tools::Envelope;
