//! MISP connectivity check tool.
//!
//! Reports the version of the connected MISP server, tolerating the two
//! API shapes deployments expose for version retrieval.

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
use tracing::info;

use crate::domains::misp::{MispConnection, VersionSupport};
use crate::domains::tools::envelope::Envelope;

/// Parameters for the ping tool. It takes none.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct MispPingParams {}

/// MISP connectivity check tool implementation.
#[derive(Debug, Clone)]
pub struct MispPingTool;

impl MispPingTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "ping";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Check connectivity to the MISP server and return its version.";

    /// Execute the tool logic.
    pub fn execute(connection: &MispConnection) -> Envelope {
        let client = match connection.client() {
            Ok(client) => client,
            Err(_) => return Envelope::not_initialized(),
        };

        info!("Pinging MISP server");

        match client.probe_api_version() {
            Ok(VersionSupport::Supported(version)) => Self::connected(version),
            Ok(VersionSupport::Unsupported) => match client.legacy_version() {
                Ok(version) => Self::connected(version),
                Err(e) => Envelope::failure(format!("connection check failed: {e}")),
            },
            Err(e) => Envelope::failure(format!("connection check failed: {e}")),
        }
    }

    fn connected(version: String) -> Envelope {
        let text = format!("connected to MISP (version {version})");
        Envelope::success(Value::String(version), text)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<MispPingParams>(),
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
        ToolRoute::new_dyn(Self::to_tool(), move |_ctx: ToolCallContext<'_, S>| {
            let connection = connection.clone();
            async move {
                // The MISP client is reqwest::blocking, which owns its own
                // runtime, so the call needs a separate OS thread.
                let handle =
                    std::thread::spawn(move || Self::execute(&connection).into_call_tool_result());

                handle
                    .join()
                    .map_err(|_| McpError::internal_error("Thread panicked".to_string(), None))
            }
            .boxed()
        })
    }
}
