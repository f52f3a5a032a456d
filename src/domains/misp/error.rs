//! MISP-specific error types.

use thiserror::Error;

/// Errors that can occur while talking to the MISP platform.
///
/// This is the closed set of failure conditions a tool handler can see;
/// every variant is converted into a failure envelope at the handler
/// boundary and never propagates further.
#[derive(Debug, Error)]
pub enum MispError {
    /// No MISP connection was established at startup.
    #[error("MISP client not initialized")]
    NotInitialized,

    /// MISP refused a well-formed request (validation, permissions,
    /// unknown identifier).
    #[error("MISP rejected the request (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    /// Network-level failure reaching the platform.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The platform replied, but the reply is missing an expected field.
    #[error("malformed MISP response: missing {0}")]
    MalformedResponse(&'static str),
}

impl MispError {
    /// Create a "platform rejected" error from an HTTP status and body.
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_initialized_message_is_fixed() {
        assert_eq!(
            MispError::NotInitialized.to_string(),
            "MISP client not initialized"
        );
    }

    #[test]
    fn test_rejected_includes_status_and_message() {
        let err = MispError::rejected(403, "unauthorized");
        let text = err.to_string();
        assert!(text.contains("403"));
        assert!(text.contains("unauthorized"));
    }
}
