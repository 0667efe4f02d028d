//! Login, landing and timeout-redirect locations.

use asgf_core::config::RoutesConfig;
use asgf_core::types::Location;

/// Message shown on the login screen after an inactivity logout.
pub const SESSION_EXPIRED_NOTICE: &str =
    "Your session expired due to inactivity. Please sign in again.";

/// Builds the locations the guard and the login flow navigate to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRoutes {
    login_path: String,
    landing_path: String,
    timeout_marker: String,
}

impl LoginRoutes {
    /// Routes from configuration.
    pub fn from_config(config: &RoutesConfig) -> Self {
        Self {
            login_path: config.login_path.clone(),
            landing_path: config.landing_path.clone(),
            timeout_marker: config.timeout_marker.clone(),
        }
    }

    /// Plain login location.
    pub fn login(&self) -> Location {
        Location::new(&self.login_path)
    }

    /// Login location carrying the inactivity marker.
    pub fn login_after_timeout(&self) -> Location {
        self.login().with_query_pair(&self.timeout_marker)
    }

    /// Default post-login location.
    pub fn landing(&self) -> Location {
        Location::new(&self.landing_path)
    }

    /// Whether `location` is the login screen reached through an inactivity logout.
    pub fn is_timeout_redirect(&self, location: &Location) -> bool {
        location.path == self.login_path && location.has_query_pair(&self.timeout_marker)
    }

    /// Explanation to show on the login screen, if any.
    pub fn login_notice(&self, location: &Location) -> Option<&'static str> {
        self.is_timeout_redirect(location)
            .then_some(SESSION_EXPIRED_NOTICE)
    }

    /// Where to go after a successful login from `login_location`.
    ///
    /// Falls back to the landing page when no origin was captured or the
    /// origin is the login page itself.
    pub fn redirect_target(&self, login_location: &Location) -> Location {
        match login_location.from.as_deref().map(Location::parse) {
            Some(origin) if origin.path != self.login_path => origin,
            _ => self.landing(),
        }
    }
}

impl Default for LoginRoutes {
    fn default() -> Self {
        Self::from_config(&RoutesConfig::default())
    }
}
