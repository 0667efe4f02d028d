//! Client storage configuration.

use serde::{Deserialize, Serialize};

/// Durable client storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage provider type: `"memory"` or `"file"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Path of the JSON document used by the `file` provider.
    #[serde(default = "default_path")]
    pub path: String,
    /// Prefix applied to every stored key.
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            path: default_path(),
            key_prefix: default_key_prefix(),
        }
    }
}

fn default_provider() -> String {
    "memory".to_string()
}

fn default_path() -> String {
    "data/admin-session.json".to_string()
}

fn default_key_prefix() -> String {
    "asgf".to_string()
}
