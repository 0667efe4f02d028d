//! # asgf-core
//!
//! Core crate for the ASGF admin back-office session. Contains the seam
//! traits (client storage, clock, navigator, authentication API),
//! configuration schemas, shared session types, and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other ASGF crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
