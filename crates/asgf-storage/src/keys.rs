//! Storage key builders for the admin session record.
//!
//! Centralising key construction keeps every reader and writer of the
//! session record on the same names.

/// Default prefix applied to all keys.
pub const DEFAULT_PREFIX: &str = "asgf";

/// The four keys that make up one session record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionKeys {
    /// Bearer token.
    pub token: String,
    /// JSON-serialized admin profile.
    pub profile: String,
    /// Last-activity timestamp in milliseconds.
    pub last_activity: String,
    /// Active admin module.
    pub active_module: String,
}

impl SessionKeys {
    /// Build the key set under `prefix`.
    pub fn new(prefix: &str) -> Self {
        Self {
            token: format!("{prefix}:admin:token"),
            profile: format!("{prefix}:admin:profile"),
            last_activity: format!("{prefix}:admin:last_activity"),
            active_module: format!("{prefix}:admin:active_module"),
        }
    }

    /// Every key of the record, in a fixed order.
    pub fn all(&self) -> [&str; 4] {
        [
            &self.token,
            &self.profile,
            &self.last_activity,
            &self.active_module,
        ]
    }
}

impl Default for SessionKeys {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}
