//! MISP attribute (IOC) creation tool.

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

use crate::domains::misp::types::DEFAULT_CATEGORY;
use crate::domains::misp::{AttributeDraft, MispConnection};
use crate::domains::tools::envelope::Envelope;

/// Parameters for the attribute creation tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct MispAddAttributeParams {
    /// Identifier of the event to attach the attribute to. Whether it
    /// exists is decided by the platform, not checked here.
    #[schemars(description = "Identifier of an existing MISP event")]
    pub event_id: String,

    /// Observable type from MISP's vocabulary.
    #[serde(rename = "type")]
    #[schemars(description = "Attribute type from MISP's vocabulary (e.g. 'ip-dst', 'domain', 'sha256')")]
    pub attribute_type: String,

    /// Raw observable value.
    #[schemars(description = "Raw observable value")]
    pub value: String,

    /// Classification category.
    #[schemars(description = "Attribute category (default: 'External analysis')")]
    #[serde(default = "default_category")]
    pub category: String,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl MispAddAttributeParams {
    fn draft(&self) -> AttributeDraft {
        AttributeDraft {
            attribute_type: self.attribute_type.clone(),
            value: self.value.clone(),
            category: self.category.clone(),
        }
    }
}

/// MISP attribute creation tool implementation.
#[derive(Debug, Clone)]
pub struct MispAddAttributeTool;

impl MispAddAttributeTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "add_attribute";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Add an attribute (indicator of compromise) to an existing MISP event. The attribute type must belong to MISP's observable vocabulary.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(event_id = %params.event_id, attribute_type = %params.attribute_type))]
    pub fn execute(params: &MispAddAttributeParams, connection: &MispConnection) -> Envelope {
        let client = match connection.client() {
            Ok(client) => client,
            Err(_) => return Envelope::not_initialized(),
        };

        match client.add_attribute(&params.event_id, &params.draft()) {
            Ok(attribute) => {
                let text = created_text(&params.attribute_type, &params.value, &params.event_id);
                Envelope::success(attribute, text)
            }
            Err(e) => Envelope::failure(format!("attribute creation failed: {e}")),
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<MispAddAttributeParams>(),
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
                let params: MispAddAttributeParams = serde_json::from_value(Value::Object(args))
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

fn created_text(attribute_type: &str, value: &str, event_id: &str) -> String {
    format!("added attribute {attribute_type}: {value} to event {event_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_attribute_params_default_category() {
        let json = r#"{"event_id": "1234", "type": "ip-dst", "value": "8.8.8.8"}"#;
        let params: MispAddAttributeParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.category, "External analysis");
        assert_eq!(params.attribute_type, "ip-dst");
    }

    #[test]
    fn test_add_attribute_params_custom_category() {
        let json = r#"{"event_id": "1234", "type": "domain", "value": "evil.example.com", "category": "Network activity"}"#;
        let params: MispAddAttributeParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.category, "Network activity");
    }

    #[test]
    fn test_add_attribute_params_require_type_and_value() {
        let result: Result<MispAddAttributeParams, _> =
            serde_json::from_str(r#"{"event_id": "1234"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_draft_serializes_type_key() {
        let json = r#"{"event_id": "1234", "type": "ip-dst", "value": "8.8.8.8"}"#;
        let params: MispAddAttributeParams = serde_json::from_str(json).unwrap();
        let draft = serde_json::to_value(params.draft()).unwrap();
        assert_eq!(draft["type"], "ip-dst");
        assert_eq!(draft["value"], "8.8.8.8");
        assert_eq!(draft["category"], "External analysis");
    }

    #[test]
    fn test_absent_connection_returns_guard_envelope() {
        let json = r#"{"event_id": "1234", "type": "ip-dst", "value": "8.8.8.8"}"#;
        let params: MispAddAttributeParams = serde_json::from_str(json).unwrap();
        let envelope = MispAddAttributeTool::execute(&params, &MispConnection::absent());
        assert!(envelope.is_failure());
        assert!(envelope.text.contains("not initialized"));
    }

    #[test]
    fn test_created_text_names_type_value_and_event() {
        let text = created_text("ip-dst", "8.8.8.8", "1234");
        assert!(text.contains("ip-dst"));
        assert!(text.contains("8.8.8.8"));
        assert!(text.contains("1234"));
    }
}
