//! Storage manager that dispatches to the configured provider.

use std::sync::Arc;

use tracing::info;

use asgf_core::config::StorageConfig;
use asgf_core::error::AppError;
use asgf_core::result::AppResult;
use asgf_core::traits::storage::{ClientStorage, WriteBatch};

use crate::keys::SessionKeys;

/// Storage manager that wraps the configured storage provider.
///
/// The provider is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct StorageManager {
    /// The inner storage provider.
    inner: Arc<dyn ClientStorage>,
    /// Keys of the session record under the configured prefix.
    keys: SessionKeys,
}

impl StorageManager {
    /// Create a new storage manager from configuration.
    pub fn new(config: &StorageConfig) -> AppResult<Self> {
        let inner: Arc<dyn ClientStorage> = match config.provider.as_str() {
            #[cfg(feature = "file")]
            "file" => {
                info!(path = %config.path, "Initializing file storage provider");
                Arc::new(crate::file::FileStorage::new(&config.path)?)
            }
            #[cfg(feature = "memory")]
            "memory" => {
                info!("Initializing in-memory storage provider");
                Arc::new(crate::memory::MemoryStorage::new())
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown storage provider: '{other}'. Supported: memory, file"
                )));
            }
        };

        Ok(Self {
            inner,
            keys: SessionKeys::new(&config.key_prefix),
        })
    }

    /// Keys of the session record.
    pub fn keys(&self) -> &SessionKeys {
        &self.keys
    }

    /// Shared handle to the inner provider.
    pub fn provider(&self) -> Arc<dyn ClientStorage> {
        Arc::clone(&self.inner)
    }
}

impl ClientStorage for StorageManager {
    fn provider_type(&self) -> &str {
        self.inner.provider_type()
    }

    fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.get(key)
    }

    fn apply(&self, batch: WriteBatch) -> AppResult<()> {
        self.inner.apply(batch)
    }

    fn keys(&self) -> AppResult<Vec<String>> {
        self.inner.keys()
    }
}
