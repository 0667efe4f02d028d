//! Session payload and raw snapshot types.

use serde::{Deserialize, Serialize};

use super::admin::AdminProfile;

/// Payload handed to the session store after a successful authentication.
///
/// Both fields are optional at the type level because upstream responses
/// may omit either; the store rejects incomplete payloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionPayload {
    /// Bearer token.
    #[serde(default, alias = "access_token")]
    pub token: Option<String>,
    /// Authenticated admin profile.
    #[serde(default, alias = "user")]
    pub admin: Option<AdminProfile>,
}

impl SessionPayload {
    /// Build a complete payload.
    pub fn new(token: impl Into<String>, admin: AdminProfile) -> Self {
        Self {
            token: Some(token.into()),
            admin: Some(admin),
        }
    }
}

/// Raw view of the stored session fields, without validation side effects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Stored token, if any.
    pub token: Option<String>,
    /// Stored profile document, unparsed.
    pub profile: Option<String>,
    /// Stored last-activity timestamp in milliseconds, if parseable.
    pub last_activity_at: Option<i64>,
    /// Stored active module.
    pub active_module: Option<String>,
}

impl SessionSnapshot {
    /// Whether no session field is stored at all.
    pub fn is_empty(&self) -> bool {
        self.token.is_none()
            && self.profile.is_none()
            && self.last_activity_at.is_none()
            && self.active_module.is_none()
    }
}
