//! Convenience result type alias for the ASGF admin crates.

use crate::error::AppError;

/// A specialized `Result` type for ASGF operations.
pub type AppResult<T> = Result<T, AppError>;
