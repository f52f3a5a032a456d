//! MISP event search tool.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::Tool,
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use crate::domains::misp::MispConnection;
use crate::domains::tools::envelope::Envelope;

use super::common::{default_limit, validate_limit};

/// Parameters for the event search tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct MispSearchEventsParams {
    /// The observable value to search for.
    #[schemars(description = "Observable value to search for (domain, hash, IP, ...)")]
    pub value: String,

    /// Maximum number of events to return.
    #[schemars(description = "Maximum number of events to return (default: 5, max: 100)")]
    #[serde(default = "default_limit")]
    pub limit: usize,
}

/// MISP event search tool implementation.
#[derive(Debug, Clone)]
pub struct MispSearchEventsTool;

impl MispSearchEventsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "search_events";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Search MISP events by an observable value (e.g. domain, hash, IP). Returns the matching events in platform order; an empty match list is a valid result.";

    /// Execute the tool logic.
    pub fn execute(params: &MispSearchEventsParams, connection: &MispConnection) -> Envelope {
        let client = match connection.client() {
            Ok(client) => client,
            Err(_) => return Envelope::not_initialized(),
        };

        let limit = validate_limit(params.limit);

        match client.search_events(&params.value, limit) {
            // Zero matches is a success with an empty list, not a failure.
            Ok(events) => {
                let text = format!("found {} event(s) for '{}'", events.len(), params.value);
                Envelope::success(Value::Array(events), text)
            }
            Err(e) => Envelope::failure(format!("search failed: {e}")),
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<MispSearchEventsParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>(connection: Arc<MispConnection>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let connection = connection.clone();
            async move {
                let params: MispSearchEventsParams =
                    serde_json::from_value(Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

                // Dedicated OS thread for the blocking MISP client.
                let handle = std::thread::spawn(move || {
                    Self::execute(&params, &connection).into_call_tool_result()
                });

                handle
                    .join()
                    .map_err(|_| McpError::internal_error("Thread panicked".to_string(), None))
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_params_default_limit() {
        let json = r#"{"value": "8.8.8.8"}"#;
        let params: MispSearchEventsParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.limit, 5);
    }

    #[test]
    fn test_search_params_custom_limit() {
        let json = r#"{"value": "evil.example.com", "limit": 20}"#;
        let params: MispSearchEventsParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.limit, 20);
    }

    #[test]
    fn test_search_params_require_value() {
        let result: Result<MispSearchEventsParams, _> = serde_json::from_str(r#"{"limit": 5}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_absent_connection_returns_guard_envelope() {
        let params = MispSearchEventsParams {
            value: "8.8.8.8".to_string(),
            limit: 5,
        };
        let envelope = MispSearchEventsTool::execute(&params, &MispConnection::absent());
        assert!(envelope.is_failure());
        assert!(envelope.text.contains("not initialized"));
    }

    // Integration test (requires a live MISP, run with: cargo test -- --ignored)
    #[ignore]
    #[test]
    fn test_search_live_respects_limit() {
        let config = crate::core::config::Config::from_env();
        let connection = MispConnection::initialize(&config.misp);

        let params = MispSearchEventsParams {
            value: "8.8.8.8".to_string(),
            limit: 5,
        };
        let envelope = MispSearchEventsTool::execute(&params, &connection);
        assert!(!envelope.is_failure(), "Expected success but got error");
        let events = envelope.result.unwrap();
        assert!(events.as_array().unwrap().len() <= 5);
    }
}
