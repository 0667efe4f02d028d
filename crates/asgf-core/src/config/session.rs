//! Session lifecycle configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Session lifecycle configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Inactivity window in minutes after which a session is invalid.
    #[serde(default = "default_inactivity_timeout")]
    pub inactivity_timeout_minutes: u64,
    /// Interval of the proactive expiry check in seconds.
    #[serde(default = "default_check_interval")]
    pub check_interval_seconds: u64,
    /// Admin module returned when none has been selected yet.
    #[serde(default = "default_module")]
    pub default_module: String,
}

impl SessionConfig {
    /// Inactivity timeout in milliseconds, saturating at `i64::MAX`.
    pub fn inactivity_timeout_ms(&self) -> i64 {
        i64::try_from(self.inactivity_timeout_minutes)
            .ok()
            .and_then(|minutes| minutes.checked_mul(60_000))
            .unwrap_or(i64::MAX)
    }

    /// Proactive check interval.
    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_seconds.max(1))
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            inactivity_timeout_minutes: default_inactivity_timeout(),
            check_interval_seconds: default_check_interval(),
            default_module: default_module(),
        }
    }
}

fn default_inactivity_timeout() -> u64 {
    15
}

fn default_check_interval() -> u64 {
    60
}

fn default_module() -> String {
    "dashboard".to_string()
}
