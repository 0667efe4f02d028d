//! The session service shared by guards, trackers and login flows.

use std::sync::Arc;
use std::time::Duration;

use asgf_core::config::AppConfig;
use asgf_core::result::AppResult;
use asgf_core::traits::auth_api::AuthApi;
use asgf_core::traits::clock::{Clock, SystemClock};
use asgf_core::traits::navigator::Navigator;
use asgf_core::types::Location;
use asgf_storage::StorageManager;

use crate::activity::InputSurface;
use crate::guard::AuthGuard;
use crate::login::LoginFlow;
use crate::navigation::LoginRoutes;
use crate::store::SessionStore;

/// Built once at startup and handed to every component that needs the
/// session. Tests build it around `MemoryStorage`, `ManualClock` and
/// `MemoryHistory`.
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// The session record owner.
    pub store: Arc<SessionStore>,
    /// Global input surface.
    pub surface: InputSurface,
    /// Navigation mechanism.
    pub navigator: Arc<dyn Navigator>,
    /// Login and landing locations.
    pub routes: LoginRoutes,
    /// Proactive expiry check interval.
    pub check_interval: Duration,
}

impl SessionContext {
    /// Assemble a context from parts.
    pub fn new(
        store: Arc<SessionStore>,
        navigator: Arc<dyn Navigator>,
        routes: LoginRoutes,
        check_interval: Duration,
    ) -> Self {
        Self {
            store,
            surface: InputSurface::new(),
            navigator,
            routes,
            check_interval,
        }
    }

    /// Build the configured storage, a system clock, and the routes.
    pub fn from_config(config: &AppConfig, navigator: Arc<dyn Navigator>) -> AppResult<Self> {
        let manager = StorageManager::new(&config.storage)?;
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let store = SessionStore::from_manager(&manager, clock, &config.session);

        Ok(Self::new(
            Arc::new(store),
            navigator,
            LoginRoutes::from_config(&config.routes),
            config.session.check_interval(),
        ))
    }

    /// Mount a guard over a protected location.
    pub fn guard(&self, location: Location) -> AuthGuard {
        AuthGuard::mount(self.clone(), location)
    }

    /// Login flow using `api`.
    pub fn login_flow(&self, api: Arc<dyn AuthApi>) -> LoginFlow {
        LoginFlow::new(self.clone(), api)
    }
}
