//! Navigation seam used for login redirects.

use crate::types::Location;

/// How a navigation affects history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationMode {
    /// Push a new history entry.
    Push,
    /// Replace the current history entry.
    Replace,
    /// Hard navigation: all in-memory application state is discarded.
    Reload,
}

/// Navigation and history mechanism.
pub trait Navigator: Send + Sync + std::fmt::Debug + 'static {
    /// The location currently displayed.
    fn current(&self) -> Location;

    /// Navigate to `to`.
    fn navigate(&self, to: Location, mode: NavigationMode);
}
