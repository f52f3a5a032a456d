//! MISP event creation tool.

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
use tracing::instrument;

use crate::domains::misp::{Analysis, Distribution, EventDraft, MispConnection, ThreatLevel};
use crate::domains::tools::envelope::Envelope;

/// Parameters for the event creation tool.
///
/// The enum fields take MISP's numeric codes; out-of-range codes are
/// rejected at deserialization, everything else is validated by the
/// platform.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct MispAddEventParams {
    /// Free-text description of the incident.
    #[schemars(description = "Free-text description of the event")]
    pub info: String,

    /// Sharing scope.
    #[schemars(
        with = "u8",
        description = "Sharing scope: 0 = your organisation only (default), 1 = this community, 2 = connected communities, 3 = all communities"
    )]
    #[serde(default)]
    pub distribution: Distribution,

    /// Severity tier.
    #[schemars(
        with = "u8",
        description = "Threat level: 1 = high, 2 = medium, 3 = low, 4 = undefined (default)"
    )]
    #[serde(default)]
    pub threat_level_id: ThreatLevel,

    /// Analysis workflow stage.
    #[schemars(
        with = "u8",
        description = "Analysis stage: 0 = initial (default), 1 = ongoing, 2 = complete"
    )]
    #[serde(default)]
    pub analysis: Analysis,
}

impl MispAddEventParams {
    fn draft(&self) -> EventDraft {
        EventDraft {
            info: self.info.clone(),
            distribution: self.distribution,
            threat_level_id: self.threat_level_id,
            analysis: self.analysis,
        }
    }
}

/// MISP event creation tool implementation.
#[derive(Debug, Clone)]
pub struct MispAddEventTool;

impl MispAddEventTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "add_event";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Create a new MISP event. Returns the created event as serialized by the platform, including its assigned identifier.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(info = %params.info))]
    pub fn execute(params: &MispAddEventParams, connection: &MispConnection) -> Envelope {
        let client = match connection.client() {
            Ok(client) => client,
            Err(_) => return Envelope::not_initialized(),
        };

        match client.add_event(&params.draft()) {
            Ok(created) => {
                let text = created_text(&created.id);
                Envelope::success(created.event, text)
            }
            Err(e) => Envelope::failure(format!("event creation failed: {e}")),
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<MispAddEventParams>(),
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
                let params: MispAddEventParams = serde_json::from_value(Value::Object(args))
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

fn created_text(event_id: &str) -> String {
    format!("created event {event_id}")
}
