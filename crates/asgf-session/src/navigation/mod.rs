//! Login routes and history navigation.

pub mod history;
pub mod routes;

pub use history::{MemoryHistory, NavigationRecord};
pub use routes::{LoginRoutes, SESSION_EXPIRED_NOTICE};
