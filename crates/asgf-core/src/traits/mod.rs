//! Seam traits between the session core and its environment.

pub mod auth_api;
pub mod clock;
pub mod navigator;
pub mod storage;

pub use auth_api::{AuthApi, Credentials};
pub use clock::{Clock, ManualClock, SystemClock};
pub use navigator::{NavigationMode, Navigator};
pub use storage::{ClientStorage, StorageOp, WriteBatch};
