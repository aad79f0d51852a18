//! HTTP Server Configuration
//!
//! Bind address, telefunc URL, CORS, shield failure policy and log level.

use serde::{Deserialize, Serialize};

use crate::observability::Severity;
use crate::server::ShieldFailurePolicy;

/// Telefunc server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelefuncConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 3000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path the telefunc handler is mounted at (default: "/_telefunc")
    #[serde(default = "default_telefunc_url")]
    pub telefunc_url: String,

    /// CORS allowed origins (default: none, permissive)
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Answer to shield rejections (default: remote_exception)
    #[serde(default)]
    pub shield_failure: ShieldFailurePolicy,

    /// Lowest severity written to the log (default: info)
    #[serde(default = "default_log_level")]
    pub log_level: Severity,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_telefunc_url() -> String {
    "/_telefunc".to_string()
}

fn default_log_level() -> Severity {
    Severity::Info
}

impl Default for TelefuncConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            telefunc_url: default_telefunc_url(),
            cors_origins: Vec::new(),
            shield_failure: ShieldFailurePolicy::default(),
            log_level: default_log_level(),
        }
    }
}

impl TelefuncConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Load from JSON; absent keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
