//! MISP connection lifecycle.
//!
//! The process holds at most one connection to MISP, constructed exactly
//! once at startup. A failed construction leaves the connection absent
//! and is never retried; every tool then answers with the standard
//! "not initialized" failure envelope instead of crashing.

use tracing::{info, warn};

use crate::core::config::MispConfig;

use super::client::MispClient;
use super::error::MispError;

/// The single process-wide handle to MISP.
///
/// Shared by `Arc` into every tool route; read-only after construction.
#[derive(Debug)]
pub struct MispConnection {
    client: Option<MispClient>,
}

impl MispConnection {
    /// Attempt exactly one client construction from configuration.
    ///
    /// Missing URL or key, or a failed client build, logs a warning and
    /// yields an absent connection. The server still starts.
    pub fn initialize(config: &MispConfig) -> Self {
        let (Some(url), Some(api_key)) = (&config.url, &config.api_key) else {
            warn!("MISP_URL / MISP_KEY not set - MISP tools will report not initialized");
            return Self::absent();
        };

        match MispClient::new(url, api_key, config.verify_cert) {
            Ok(client) => {
                info!("MISP client configured for {}", client.base_url());
                Self {
                    client: Some(client),
                }
            }
            Err(e) => {
                warn!("Could not set up MISP client: {}", e);
                Self::absent()
            }
        }
    }

    /// A connection that was never established.
    pub fn absent() -> Self {
        Self { client: None }
    }

    /// Whether a client exists.
    pub fn is_ready(&self) -> bool {
        self.client.is_some()
    }

    /// The readiness guard shared by every tool handler.
    pub fn client(&self) -> Result<&MispClient, MispError> {
        self.client.as_ref().ok_or(MispError::NotInitialized)
    }
}
