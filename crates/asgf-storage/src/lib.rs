//! # asgf-storage
//!
//! Durable client storage for the admin session. Two backends:
//!
//! - **memory**: process-local map, shared between clones
//! - **file**: a single JSON document on disk, rewritten atomically
//!
//! The backend is selected at runtime based on configuration.

pub mod keys;
#[cfg(feature = "file")]
pub mod file;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;

pub use keys::SessionKeys;
pub use provider::StorageManager;
