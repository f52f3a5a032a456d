//! Tool Router - builds the rmcp ToolRouter.
//!
//! This module builds the ToolRouter by delegating to the tool
//! definitions themselves. Each tool knows how to create its own route;
//! the shared MISP connection is injected into every route here.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use crate::domains::misp::MispConnection;

use super::definitions::{
    MispAddAttributeTool, MispAddEventTool, MispPingTool, MispSearchEventsTool,
};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(connection: Arc<MispConnection>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(MispPingTool::create_route(connection.clone()))
        .with_route(MispSearchEventsTool::create_route(connection.clone()))
        .with_route(MispAddEventTool::create_route(connection.clone()))
        .with_route(MispAddAttributeTool::create_route(connection))
}

#[cfg(test)]
mod tests {
    use super::super::registry::ToolRegistry;
    use super::*;

    struct TestServer {}

    fn test_connection() -> Arc<MispConnection> {
        Arc::new(MispConnection::absent())
    }

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(test_connection());
        let tools = router.list_all();
        assert_eq!(tools.len(), 4);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"ping"));
        assert!(names.contains(&"search_events"));
        assert!(names.contains(&"add_event"));
        assert!(names.contains(&"add_attribute"));
    }

    #[test]
    fn test_registry_matches_router() {
        // Ensure registry and router expose the same tools
        let registry_names = ToolRegistry::tool_names();

        let router: ToolRouter<TestServer> = build_tool_router(test_connection());
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name));
        }
    }
}
