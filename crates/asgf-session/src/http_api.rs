//! HTTP client for the external admin authentication endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use asgf_core::config::AuthApiConfig;
use asgf_core::error::{AppError, ErrorKind};
use asgf_core::result::AppResult;
use asgf_core::traits::auth_api::{AuthApi, Credentials};
use asgf_core::types::SessionPayload;

const DEFAULT_REJECTION: &str = "Invalid email or password";

/// POSTs credentials as JSON and decodes `{token, admin}` from the response.
#[derive(Debug, Clone)]
pub struct HttpAuthApi {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpAuthApi {
    /// Build a client from configuration.
    pub fn new(config: &AuthApiConfig) -> AppResult<Self> {
        if config.endpoint.trim().is_empty() {
            return Err(AppError::configuration("auth_api.endpoint must not be empty"));
        }

        let client = Client::builder()
            .user_agent(concat!("asgf-admin/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_seconds.max(1)))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to create HTTP client", e)
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
        })
    }

    /// Configured endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn authenticate(&self, credentials: &Credentials) -> AppResult<SessionPayload> {
        let mut request = self.client.post(&self.endpoint).json(credentials);
        if let Some(key) = &self.api_key {
            request = request.header("apikey", key).bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            warn!(endpoint = %self.endpoint, error = %e, "Authentication request failed");
            AppError::with_source(
                ErrorKind::ExternalService,
                "Authentication service unreachable",
                e,
            )
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                "Failed to read authentication response",
                e,
            )
        })?;
        debug!(status = status.as_u16(), "Authentication response received");

        if !status.is_success() {
            return Err(status_error(status, &body));
        }
        parse_payload(&body)
    }
}

fn status_error(status: StatusCode, body: &str) -> AppError {
    let detail = error_message(body);
    if status.is_client_error() {
        AppError::authentication(detail.unwrap_or_else(|| DEFAULT_REJECTION.to_string()))
    } else {
        AppError::external_service(format!(
            "Authentication service error ({status}): {}",
            detail.unwrap_or_else(|| body.trim().to_string())
        ))
    }
}

/// Human-readable error from an error response body, if it has one.
///
/// Looks at `error`, `message` and `msg`, and one level into an `error`
/// object.
pub(crate) fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let text = |v: &Value| {
        v.as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    ["error", "message", "msg"].iter().find_map(|field| {
        let v = value.get(field)?;
        text(v).or_else(|| v.get("message").and_then(text))
    })
}

/// Decode a successful response body. Missing fields are left to the
/// session store to reject.
pub(crate) fn parse_payload(body: &str) -> AppResult<SessionPayload> {
    serde_json::from_str(body).map_err(|e| {
        AppError::with_source(
            ErrorKind::Serialization,
            "Malformed authentication response",
            e,
        )
    })
}
