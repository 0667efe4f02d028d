//! Login and landing route configuration.

use serde::{Deserialize, Serialize};

/// Routes used by the guard and the login flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutesConfig {
    /// Path of the admin login screen.
    #[serde(default = "default_login_path")]
    pub login_path: String,
    /// Landing path after login when no redirect target was captured.
    #[serde(default = "default_landing_path")]
    pub landing_path: String,
    /// Query pair appended to the login path after an inactivity timeout.
    #[serde(default = "default_timeout_marker")]
    pub timeout_marker: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            login_path: default_login_path(),
            landing_path: default_landing_path(),
            timeout_marker: default_timeout_marker(),
        }
    }
}

fn default_login_path() -> String {
    "/admin/login".to_string()
}

fn default_landing_path() -> String {
    "/admin/dashboard".to_string()
}

fn default_timeout_marker() -> String {
    "expired=1".to_string()
}
