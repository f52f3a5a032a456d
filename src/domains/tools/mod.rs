//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are executable functions that can be called by MCP clients to
//! perform specific actions against the MISP platform.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `envelope.rs` - The uniform `{result, text}` outcome every tool returns
//! - `router.rs` - Dynamic ToolRouter builder
//! - `registry.rs` - Central tool name/metadata registry
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/misp/` (e.g., `my_tool.rs`)
//! 2. Define params and an `execute()` returning an `Envelope`
//! 3. Export in `definitions/misp/mod.rs`
//! 4. Add a route in `router.rs` and a name in `registry.rs`

pub mod definitions;
mod envelope;
mod registry;
pub mod router;

pub use envelope::{Envelope, FAILURE_MARKER};
pub use registry::ToolRegistry;
pub use router::build_tool_router;
