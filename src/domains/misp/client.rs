//! MISP REST client.
//!
//! A thin typed layer over the MISP HTTP API. Each public method performs
//! exactly one platform call and shapes the JSON reply; response shaping
//! lives in free functions so it can be exercised without a network.
//!
//! The client uses `reqwest::blocking`, which owns its own runtime.
//! Callers inside an async context must run these methods on a dedicated
//! OS thread (see the tool route implementations).

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use reqwest::header;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, info};

use super::error::MispError;
use super::types::{AttributeDraft, EventDraft};
use super::version::{self, VersionSupport};

/// A created event as reported back by MISP.
#[derive(Debug, Clone)]
pub struct CreatedEvent {
    /// Identifier assigned by the platform.
    pub id: String,

    /// The full serialized event object.
    pub event: Value,
}

/// Handle to a MISP instance.
pub struct MispClient {
    http: Client,
    base_url: String,
    api_key: String,
}

/// Manual Debug to keep the API key out of logs.
impl std::fmt::Debug for MispClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MispClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl MispClient {
    /// Build a client for the given MISP instance.
    ///
    /// `verify_cert = false` disables TLS certificate verification, which
    /// is common for self-hosted MISP deployments with self-signed
    /// certificates.
    pub fn new(url: &str, api_key: &str, verify_cert: bool) -> Result<Self, MispError> {
        let http = Client::builder()
            .danger_accept_invalid_certs(!verify_cert)
            .build()?;

        Ok(Self {
            http,
            base_url: url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn get(&self, path: &str) -> Result<Response, MispError> {
        let resp = self
            .http
            .get(self.endpoint(path))
            .header(header::AUTHORIZATION, self.api_key.as_str())
            .header(header::ACCEPT, "application/json")
            .send()?;
        Ok(resp)
    }

    fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response, MispError> {
        let resp = self
            .http
            .post(self.endpoint(path))
            .header(header::AUTHORIZATION, self.api_key.as_str())
            .header(header::ACCEPT, "application/json")
            .json(body)
            .send()?;
        Ok(resp)
    }

    /// Decode a reply that is expected to be a 2xx JSON body.
    fn success_json(resp: Response) -> Result<Value, MispError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(MispError::rejected(
                status.as_u16(),
                rejection_message(&body),
            ));
        }
        resp.json::<Value>()
            .map_err(|_| MispError::MalformedResponse("JSON body"))
    }

    /// Probe whether the connected server exposes the modern version
    /// endpoint (`servers/getVersion`).
    ///
    /// HTTP 404 means the shape is unsupported on this deployment, which
    /// is a capability mismatch rather than a failure; everything else
    /// non-2xx is a platform rejection.
    pub fn probe_api_version(&self) -> Result<VersionSupport, MispError> {
        let resp = self.get("servers/getVersion")?;
        if resp.status() == StatusCode::NOT_FOUND {
            debug!("Modern version endpoint not available, legacy fallback required");
            return Ok(VersionSupport::Unsupported);
        }

        let payload = Self::success_json(resp)?;
        match version::version_from_payload(&payload) {
            Some(v) => Ok(VersionSupport::Supported(v)),
            None => Err(MispError::MalformedResponse("version field")),
        }
    }

    /// Fetch the version through the legacy nested endpoint
    /// (`servers/getVersion.json`). A reply without a version field
    /// yields the "unknown" sentinel, not an error.
    pub fn legacy_version(&self) -> Result<String, MispError> {
        let resp = self.get("servers/getVersion.json")?;
        let payload = Self::success_json(resp)?;
        Ok(version::legacy_version_from_payload(&payload))
    }

    /// Search events matching an observable value, capped at `limit`
    /// results. The platform's ordering is preserved.
    pub fn search_events(&self, value: &str, limit: usize) -> Result<Vec<Value>, MispError> {
        info!("Searching MISP events for value: {}", value);

        let body = json!({
            "returnFormat": "json",
            "value": value,
            "limit": limit,
        });
        let resp = self.post("events/restSearch", &body)?;
        let payload = Self::success_json(resp)?;
        events_from_search(payload)
    }

    /// Create a new event from a draft.
    pub fn add_event(&self, draft: &EventDraft) -> Result<CreatedEvent, MispError> {
        info!("Creating MISP event: {}", draft.info);

        let resp = self.post("events/add", draft)?;
        let payload = Self::success_json(resp)?;
        created_event(payload)
    }

    /// Attach an attribute to an existing event. Existence of `event_id`
    /// is delegated entirely to the platform.
    pub fn add_attribute(&self, event_id: &str, draft: &AttributeDraft) -> Result<Value, MispError> {
        info!(
            "Adding attribute {}: {} to event {}",
            draft.attribute_type, draft.value, event_id
        );

        let resp = self.post(&format!("attributes/add/{event_id}"), draft)?;
        let payload = Self::success_json(resp)?;
        created_attribute(payload)
    }
}

// ============================================================================
// Response shaping
// ============================================================================

/// Extract the event list from an `events/restSearch` reply.
///
/// MISP wraps the list in a `response` key; some deployments return the
/// bare array. An empty list is a valid result, not an error.
pub fn events_from_search(payload: Value) -> Result<Vec<Value>, MispError> {
    match payload {
        Value::Array(events) => Ok(events),
        Value::Object(mut map) => match map.remove("response") {
            Some(Value::Array(events)) => Ok(events),
            _ => Err(MispError::MalformedResponse("response array")),
        },
        _ => Err(MispError::MalformedResponse("response array")),
    }
}

/// Extract the created event (and its platform-assigned identifier) from
/// an `events/add` reply.
pub fn created_event(payload: Value) -> Result<CreatedEvent, MispError> {
    let event = match payload {
        Value::Object(mut map) => map
            .remove("Event")
            .ok_or(MispError::MalformedResponse("Event object"))?,
        _ => return Err(MispError::MalformedResponse("Event object")),
    };

    let id = id_of(&event).ok_or(MispError::MalformedResponse("event identifier"))?;
    Ok(CreatedEvent { id, event })
}

/// Extract the created attribute from an `attributes/add` reply.
pub fn created_attribute(payload: Value) -> Result<Value, MispError> {
    match payload {
        Value::Object(mut map) => map
            .remove("Attribute")
            .ok_or(MispError::MalformedResponse("Attribute object")),
        _ => Err(MispError::MalformedResponse("Attribute object")),
    }
}

/// Read an object's identifier. MISP serializes ids as strings but older
/// versions emit bare numbers.
pub fn id_of(object: &Value) -> Option<String> {
    match object.get("id")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Pull a human-readable message out of an error reply body.
fn rejection_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        "no error detail provided".to_string()
    } else {
        trimmed.chars().take(200).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_events_from_wrapped_search_reply() {
        let payload = json!({"response": [{"Event": {"id": "1"}}, {"Event": {"id": "2"}}]});
        let events = events_from_search(payload).unwrap();
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_events_from_bare_array_reply() {
        let payload = json!([{"Event": {"id": "1"}}]);
        let events = events_from_search(payload).unwrap();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_empty_search_reply_is_success() {
        let events = events_from_search(json!({"response": []})).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_search_reply_without_response_key_is_malformed() {
        let result = events_from_search(json!({"errors": "bad filter"}));
        assert!(matches!(result, Err(MispError::MalformedResponse(_))));
    }

    #[test]
    fn test_created_event_extracts_identifier() {
        let payload = json!({"Event": {"id": "1234", "info": "test event"}});
        let created = created_event(payload).unwrap();
        assert_eq!(created.id, "1234");
        assert_eq!(created.event["info"], "test event");
    }

    #[test]
    fn test_created_event_numeric_identifier() {
        let payload = json!({"Event": {"id": 42, "info": "test event"}});
        assert_eq!(created_event(payload).unwrap().id, "42");
    }

    #[test]
    fn test_created_event_without_identifier_is_malformed() {
        let result = created_event(json!({"Event": {"info": "no id"}}));
        assert!(matches!(
            result,
            Err(MispError::MalformedResponse("event identifier"))
        ));
    }

    #[test]
    fn test_created_event_without_event_object_is_malformed() {
        let result = created_event(json!({"message": "saved"}));
        assert!(matches!(
            result,
            Err(MispError::MalformedResponse("Event object"))
        ));
    }

    #[test]
    fn test_created_attribute_unwraps_object() {
        let payload = json!({"Attribute": {"id": "9", "type": "ip-dst", "value": "8.8.8.8"}});
        let attribute = created_attribute(payload).unwrap();
        assert_eq!(attribute["type"], "ip-dst");
    }

    #[test]
    fn test_rejection_message_prefers_json_field() {
        assert_eq!(
            rejection_message(r#"{"message": "Invalid event", "errors": {}}"#),
            "Invalid event"
        );
        assert_eq!(rejection_message("plain text error"), "plain text error");
        assert_eq!(rejection_message("  "), "no error detail provided");
    }

    #[test]
    fn test_client_debug_redacts_key() {
        let client = MispClient::new("https://misp.local/", "secret-key", false).unwrap();
        let debug = format!("{client:?}");
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("secret-key"));
        assert_eq!(client.base_url(), "https://misp.local");
    }
}
