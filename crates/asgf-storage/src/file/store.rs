//! File-backed client storage.
//!
//! All entries live in one JSON object on disk. Every batch rewrites the
//! whole document through a uniquely named temp file in the same directory
//! and a rename, so a crash or a concurrent writer leaves either the old or
//! the new document, never a half-written one.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, warn};

use asgf_core::error::{AppError, ErrorKind};
use asgf_core::result::AppResult;
use asgf_core::traits::storage::{ClientStorage, StorageOp, WriteBatch};

type Entries = BTreeMap<String, String>;

/// File storage provider.
#[derive(Debug)]
pub struct FileStorage {
    /// Location of the JSON document.
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileStorage {
    /// Create a provider backed by `path`, creating parent directories.
    pub fn new(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Storage,
                        format!("Failed to create storage directory: {}", parent.display()),
                        e,
                    )
                })?;
            }
        }
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> AppResult<Entries> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read storage file: {}", self.path.display()),
                    e,
                ));
            }
        };
        if raw.trim().is_empty() {
            return Ok(Entries::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    fn write_entries(&self, entries: &Entries) -> AppResult<()> {
        let json = serde_json::to_string_pretty(entries)?;
        let io_error = |context: &str, e: std::io::Error| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("{context}: {}", self.path.display()),
                e,
            )
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)
            .map_err(|e| io_error("Failed to create temp file for storage", e))?;
        tmp.write_all(json.as_bytes())
            .and_then(|()| tmp.flush())
            .map_err(|e| io_error("Failed to write storage file", e))?;
        tmp.persist(&self.path)
            .map_err(|e| io_error("Failed to replace storage file", e.error))?;
        Ok(())
    }
}

impl ClientStorage for FileStorage {
    fn provider_type(&self) -> &str {
        "file"
    }

    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.read_entries()?.remove(key))
    }

    fn apply(&self, batch: WriteBatch) -> AppResult<()> {
        if batch.is_empty() {
            return Ok(());
        }
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| AppError::storage("File storage lock poisoned"))?;

        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(e) if e.kind == ErrorKind::Serialization => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Storage file is corrupted, starting from an empty document"
                );
                Entries::new()
            }
            Err(e) => return Err(e),
        };

        let ops = batch.len();
        for op in batch {
            match op {
                StorageOp::Set { key, value } => {
                    entries.insert(key, value);
                }
                StorageOp::Remove { key } => {
                    entries.remove(&key);
                }
            }
        }

        self.write_entries(&entries)?;
        debug!(path = %self.path.display(), ops, "Applied storage batch");
        Ok(())
    }

    fn keys(&self) -> AppResult<Vec<String>> {
        Ok(self.read_entries()?.into_keys().collect())
    }
}
