//! Admin login: credentials in, persisted session and redirect out.

use std::sync::Arc;

use tracing::{info, warn};

use asgf_core::error::ErrorKind;
use asgf_core::traits::auth_api::{AuthApi, Credentials};
use asgf_core::traits::navigator::NavigationMode;
use asgf_core::types::Location;

use crate::context::SessionContext;

const MISSING_CREDENTIALS: &str = "Please enter your email and password.";
const SERVICE_UNAVAILABLE: &str = "Unable to reach the authentication service. Please try again.";
const INVALID_RESPONSE: &str = "The server returned an incomplete session. Please try again.";

/// Login form state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    /// Email as typed; trimmed on submit.
    pub email: String,
    /// Password as typed.
    pub password: String,
    /// User-visible error from the last submission.
    pub error: Option<String>,
    /// Whether a submission is in flight.
    pub submitting: bool,
}

impl LoginForm {
    /// A filled-in form with no error and nothing in flight.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            ..Self::default()
        }
    }
}

/// Result of a login submission.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    /// Session persisted; the login entry was replaced by this location.
    Redirected(Location),
    /// The admin stays on the login screen with this message.
    Rejected(String),
}

/// Drives the login screen.
#[derive(Clone)]
pub struct LoginFlow {
    ctx: SessionContext,
    api: Arc<dyn AuthApi>,
}

impl std::fmt::Debug for LoginFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginFlow")
            .field("routes", &self.ctx.routes)
            .finish_non_exhaustive()
    }
}

impl LoginFlow {
    /// Login screen over `ctx`, authenticating through `api`.
    pub fn new(ctx: SessionContext, api: Arc<dyn AuthApi>) -> Self {
        Self { ctx, api }
    }

    /// Message explaining why the admin landed on the login screen.
    pub fn notice(&self) -> Option<&'static str> {
        self.ctx.routes.login_notice(&self.ctx.navigator.current())
    }

    /// Submit the form.
    ///
    /// On failure the message is also stored in `form.error` and the
    /// credentials are left untouched for a retry.
    pub async fn submit(&self, form: &mut LoginForm) -> LoginOutcome {
        form.error = None;

        let email = form.email.trim();
        if email.is_empty() || form.password.is_empty() {
            return reject(form, MISSING_CREDENTIALS);
        }
        let credentials = Credentials::new(email, form.password.clone());

        form.submitting = true;
        let response = self.api.authenticate(&credentials).await;
        form.submitting = false;

        let payload = match response {
            Ok(payload) => payload,
            Err(e) if e.is(ErrorKind::Authentication) => {
                warn!(email = %credentials.email, error = %e, "Admin login rejected");
                return reject(form, &e.message);
            }
            Err(e) => {
                warn!(email = %credentials.email, error = %e, "Authentication service failed");
                return reject(form, SERVICE_UNAVAILABLE);
            }
        };

        let admin = match self.ctx.store.persist_session(payload) {
            Ok(admin) => admin,
            Err(e) => {
                warn!(email = %credentials.email, error = %e, "Login response could not be persisted");
                return reject(form, INVALID_RESPONSE);
            }
        };

        let target = self.ctx.routes.redirect_target(&self.ctx.navigator.current());
        info!(admin = %admin.label(), target = %target, "Admin logged in");
        self.ctx
            .navigator
            .navigate(target.clone(), NavigationMode::Replace);
        LoginOutcome::Redirected(target)
    }
}

fn reject(form: &mut LoginForm, message: &str) -> LoginOutcome {
    form.error = Some(message.to_string());
    LoginOutcome::Rejected(message.to_string())
}
