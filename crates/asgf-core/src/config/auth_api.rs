//! External authentication API configuration.

use serde::{Deserialize, Serialize};

/// Settings for the HTTP authentication endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthApiConfig {
    /// Full URL that accepts `{email, password}` and answers `{token, admin}`.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Optional project API key sent as the `apikey` header.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for AuthApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: None,
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_endpoint() -> String {
    "http://localhost:54321/functions/v1/admin-login".to_string()
}

fn default_timeout() -> u64 {
    15
}
