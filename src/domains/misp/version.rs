//! Version capability probing.
//!
//! MISP deployments expose their version through one of two mutually
//! exclusive API shapes: a modern direct endpoint and a legacy endpoint
//! that nests the value one level deeper. The probe reports which shape
//! the connected server speaks as an explicit tag, so the ping tool can
//! branch on it instead of treating a failed call as "unsupported".

use serde_json::Value;

/// Sentinel reported when the legacy payload carries no version field.
pub const UNKNOWN_VERSION: &str = "unknown";

/// Outcome of probing the modern version endpoint.
///
/// `Unsupported` means the connected server does not expose the modern
/// shape (a capability mismatch, recoverable via the legacy endpoint).
/// Transport failures are not represented here; they surface as errors
/// from the probe call itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSupport {
    /// The modern endpoint answered with this version string.
    Supported(String),
    /// The modern endpoint is not present on this server.
    Unsupported,
}

/// Extract the version string from a modern `servers/getVersion` payload.
pub fn version_from_payload(payload: &Value) -> Option<String> {
    payload
        .get("version")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

/// Extract the version string from a legacy `servers/getVersion.json`
/// payload, falling back to the explicit unknown sentinel when the field
/// is absent.
pub fn legacy_version_from_payload(payload: &Value) -> String {
    version_from_payload(payload).unwrap_or_else(|| UNKNOWN_VERSION.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_version_from_modern_payload() {
        let payload = json!({"version": "2.4.190", "perm_sync": true});
        assert_eq!(version_from_payload(&payload).as_deref(), Some("2.4.190"));
    }

    #[test]
    fn test_version_missing_from_modern_payload() {
        assert_eq!(version_from_payload(&json!({"status": "ok"})), None);
        assert_eq!(version_from_payload(&json!({"version": 24})), None);
    }

    #[test]
    fn test_legacy_version_present() {
        let payload = json!({"version": "2.3.118"});
        assert_eq!(legacy_version_from_payload(&payload), "2.3.118");
    }

    #[test]
    fn test_legacy_version_missing_is_unknown_not_failure() {
        let payload = json!({"timestamp": "1700000000"});
        assert_eq!(legacy_version_from_payload(&payload), UNKNOWN_VERSION);
    }
}
