//! In-memory client storage.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::debug;

use asgf_core::error::AppError;
use asgf_core::result::AppResult;
use asgf_core::traits::storage::{ClientStorage, StorageOp, WriteBatch};

/// In-memory storage provider.
///
/// Clones share the same map, so a test can keep a handle and inspect
/// what the session store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    /// Stored entries.
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.read().map(|map| map.len()).unwrap_or(0)
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> AppError {
    AppError::storage("In-memory storage lock poisoned")
}

impl ClientStorage for MemoryStorage {
    fn provider_type(&self) -> &str {
        "memory"
    }

    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let map = self.entries.read().map_err(|_| poisoned())?;
        Ok(map.get(key).cloned())
    }

    fn apply(&self, batch: WriteBatch) -> AppResult<()> {
        if batch.is_empty() {
            return Ok(());
        }
        let ops = batch.len();
        let mut map = self.entries.write().map_err(|_| poisoned())?;
        for op in batch {
            match op {
                StorageOp::Set { key, value } => {
                    map.insert(key, value);
                }
                StorageOp::Remove { key } => {
                    map.remove(&key);
                }
            }
        }
        debug!(ops, "Applied storage batch");
        Ok(())
    }

    fn keys(&self) -> AppResult<Vec<String>> {
        let map = self.entries.read().map_err(|_| poisoned())?;
        Ok(map.keys().cloned().collect())
    }
}
