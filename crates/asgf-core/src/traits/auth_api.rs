//! External authentication API seam.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

use crate::result::AppResult;
use crate::types::SessionPayload;

/// Login credentials.
#[derive(Clone, Serialize)]
pub struct Credentials {
    /// Admin email.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

impl Credentials {
    /// Build credentials.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Verifies admin credentials and returns the session payload.
#[async_trait]
pub trait AuthApi: Send + Sync + fmt::Debug + 'static {
    /// Authenticate. Errors carry a message fit for display on the login form.
    async fn authenticate(&self, credentials: &Credentials) -> AppResult<SessionPayload>;
}
