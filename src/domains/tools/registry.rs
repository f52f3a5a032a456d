//! Tool Registry - central registration for all tools.
//!
//! The registry is the single source of truth for tool names and
//! metadata; the router test checks it stays in sync with the routes.

use rmcp::model::Tool;

use super::definitions::{
    MispAddAttributeTool, MispAddEventTool, MispPingTool, MispSearchEventsTool,
};

/// Tool registry - lists all available tools.
pub struct ToolRegistry;

impl ToolRegistry {
    /// Get all tool names.
    pub fn tool_names() -> Vec<&'static str> {
        vec![
            MispPingTool::NAME,
            MispSearchEventsTool::NAME,
            MispAddEventTool::NAME,
            MispAddAttributeTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            MispPingTool::to_tool(),
            MispSearchEventsTool::to_tool(),
            MispAddEventTool::to_tool(),
            MispAddAttributeTool::to_tool(),
        ]
    }
}
