//! Interaction tracking and proactive inactivity expiry.

pub mod surface;
pub mod tracker;

pub use surface::{InputSurface, InteractionKind, Listener, ListenerOptions};
pub use tracker::{ActivityTracker, ExpiryCallback};
