//! Client-durable key/value storage trait.

use crate::result::AppResult;

/// A single mutation inside a [`WriteBatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageOp {
    /// Store `value` under `key`, replacing any previous value.
    Set {
        /// Key to write.
        key: String,
        /// Value to store.
        value: String,
    },
    /// Remove `key` if present.
    Remove {
        /// Key to remove.
        key: String,
    },
}

/// An ordered group of mutations applied as one unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteBatch {
    ops: Vec<StorageOp>,
}

impl WriteBatch {
    /// Create an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a set operation.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.ops.push(StorageOp::Set {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    /// Add a remove operation.
    pub fn remove(mut self, key: impl Into<String>) -> Self {
        self.ops.push(StorageOp::Remove { key: key.into() });
        self
    }

    /// Whether the batch has no operations.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }
}

impl IntoIterator for WriteBatch {
    type Item = StorageOp;
    type IntoIter = std::vec::IntoIter<StorageOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

/// Trait for durable client storage backends (in-memory or file).
///
/// Reads and writes are short synchronous critical sections, mirroring
/// browser storage. [`ClientStorage::apply`] must make a whole batch
/// visible at once: readers observe either none or all of its operations.
pub trait ClientStorage: Send + Sync + std::fmt::Debug + 'static {
    /// Short provider name used in logs.
    fn provider_type(&self) -> &str;

    /// Get a value by key. Returns `None` if the key does not exist.
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Apply every operation of the batch atomically.
    fn apply(&self, batch: WriteBatch) -> AppResult<()>;

    /// List stored keys.
    fn keys(&self) -> AppResult<Vec<String>>;

    /// Store a single value.
    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.apply(WriteBatch::new().set(key, value))
    }

    /// Remove a single key.
    fn remove(&self, key: &str) -> AppResult<()> {
        self.apply(WriteBatch::new().remove(key))
    }
}
