//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure populated
//! from environment variables (optionally via a `.env` file).

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// MISP platform connection configuration.
    pub misp: MispConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Configuration for the MISP platform connection.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct MispConfig {
    /// Base URL of the MISP instance.
    pub url: Option<String>,

    /// API key used to authenticate against MISP.
    pub api_key: Option<String>,

    /// Whether to verify the MISP TLS certificate.
    pub verify_cert: bool,
}

/// Custom Debug implementation to redact the API key from logs.
impl std::fmt::Debug for MispConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MispConfig")
            .field("url", &self.url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("verify_cert", &self.verify_cert)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "misp-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            misp: MispConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// MISP settings use the `MISP_` prefix; server and transport
    /// settings use the `MCP_` prefix.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env();

        if let Ok(url) = std::env::var("MISP_URL") {
            config.misp.url = Some(url);
        } else {
            warn!("MISP_URL not set - the MISP connection will stay uninitialized");
        }

        if let Ok(api_key) = std::env::var("MISP_KEY") {
            config.misp.api_key = Some(api_key);
        } else {
            warn!("MISP_KEY not set - the MISP connection will stay uninitialized");
        }

        if let Ok(verify) = std::env::var("MISP_VERIFY_CERT") {
            config.misp.verify_cert = verify.eq_ignore_ascii_case("true") || verify == "1";
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_misp_settings_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MISP_URL", "https://misp.example.org");
            std::env::set_var("MISP_KEY", "test_key_12345");
            std::env::set_var("MISP_VERIFY_CERT", "true");
        }
        let config = Config::from_env();
        assert_eq!(config.misp.url.as_deref(), Some("https://misp.example.org"));
        assert_eq!(config.misp.api_key.as_deref(), Some("test_key_12345"));
        assert!(config.misp.verify_cert);
        unsafe {
            std::env::remove_var("MISP_URL");
            std::env::remove_var("MISP_KEY");
            std::env::remove_var("MISP_VERIFY_CERT");
        }
    }

    #[test]
    fn test_verify_cert_defaults_to_false() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::remove_var("MISP_VERIFY_CERT");
        }
        let config = Config::from_env();
        assert!(!config.misp.verify_cert);
    }

    #[test]
    fn test_verify_cert_rejects_other_values() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MISP_VERIFY_CERT", "yes");
        }
        let config = Config::from_env();
        assert!(!config.misp.verify_cert);
        unsafe {
            std::env::remove_var("MISP_VERIFY_CERT");
        }
    }

    #[test]
    fn test_api_key_redacted_in_debug() {
        let misp = MispConfig {
            url: Some("https://misp.example.org".to_string()),
            api_key: Some("super_secret_key".to_string()),
            verify_cert: false,
        };
        let debug_str = format!("{:?}", misp);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_key"));
    }
}
