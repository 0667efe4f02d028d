//! # asgf-session
//!
//! Client-side admin session lifecycle for the ASGF back-office.
//!
//! ## Modules
//!
//! - `store`: durable session record (token, profile, last activity, active module)
//! - `expiry`: inactivity verdicts shared by lazy and proactive expiry
//! - `activity`: input surface and the proactive inactivity tracker
//! - `guard`: route gate state machine for protected admin areas
//! - `login`: credential submission and post-login navigation
//! - `navigation`: login routes and the in-memory history navigator
//! - `http_api`: HTTP client for the external authentication API
//! - `context`: the single session service shared by all of the above

pub mod activity;
pub mod context;
pub mod expiry;
pub mod guard;
pub mod http_api;
pub mod login;
pub mod navigation;
pub mod store;

pub use activity::{ActivityTracker, InputSurface, InteractionKind, ListenerOptions};
pub use context::SessionContext;
pub use expiry::ExpiryVerdict;
pub use guard::{AuthGuard, GuardState, GuardView, LogoutHandle};
pub use http_api::HttpAuthApi;
pub use login::{LoginFlow, LoginForm, LoginOutcome};
pub use navigation::{LoginRoutes, MemoryHistory};
pub use store::{SessionLookup, SessionStore};
