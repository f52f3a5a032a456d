//! The uniform tool result envelope.
//!
//! Every MISP tool returns exactly one `Envelope { result, text }`,
//! success or failure alike. The envelope is the error channel: `result`
//! is absent precisely when `text` starts with the failure marker, and
//! the MCP-level `isError` flag is never used for platform failures.

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::domains::misp::MispError;

/// Prefix carried by every failure `text`.
pub const FAILURE_MARKER: &str = "error:";

/// Uniform `{result, text}` outcome of one tool invocation.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope {
    /// Structured payload; present exactly on success.
    pub result: Option<Value>,

    /// Human-readable status line.
    pub text: String,
}

impl Envelope {
    /// A successful outcome carrying a structured payload.
    pub fn success(result: Value, text: impl Into<String>) -> Self {
        Self {
            result: Some(result),
            text: text.into(),
        }
    }

    /// A failed outcome. The reason is embedded after the failure marker
    /// and logged at warn level.
    pub fn failure(reason: impl std::fmt::Display) -> Self {
        let text = format!("{FAILURE_MARKER} {reason}");
        warn!("{}", text);
        Self { result: None, text }
    }

    /// The standardized guard envelope returned by every tool when no
    /// MISP connection was established at startup.
    pub fn not_initialized() -> Self {
        Self::failure(MispError::NotInitialized)
    }

    /// Whether this envelope reports a failure.
    pub fn is_failure(&self) -> bool {
        self.result.is_none()
    }

    /// Serialize into the MCP tool result.
    ///
    /// Both outcomes become a success-shaped result carrying the
    /// serialized envelope; callers distinguish them by `result`
    /// presence or the leading marker of `text`.
    pub fn into_call_tool_result(self) -> CallToolResult {
        let payload = serde_json::json!({
            "result": self.result,
            "text": self.text,
        });
        CallToolResult::success(vec![Content::text(payload.to_string())])
    }
}

impl From<Envelope> for CallToolResult {
    fn from(envelope: Envelope) -> Self {
        envelope.into_call_tool_result()
    }
}
