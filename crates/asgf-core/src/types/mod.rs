//! Shared value types for the admin session.

pub mod admin;
pub mod location;
pub mod session;

pub use admin::AdminProfile;
pub use location::Location;
pub use session::{SessionPayload, SessionSnapshot};
