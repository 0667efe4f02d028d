//! Durable admin session record.
//!
//! [`SessionStore`] is the only writer of the session keys. Every read of
//! the admin profile is also a lazy expiry checkpoint: an absent, corrupted
//! or idle-expired record is cleared as a whole before `None` is returned.

use std::sync::Arc;

use tracing::{debug, info, warn};

use asgf_core::config::SessionConfig;
use asgf_core::error::AppError;
use asgf_core::result::AppResult;
use asgf_core::traits::clock::Clock;
use asgf_core::traits::storage::{ClientStorage, WriteBatch};
use asgf_core::types::{AdminProfile, SessionPayload, SessionSnapshot};
use asgf_storage::{SessionKeys, StorageManager};

use crate::expiry::ExpiryVerdict;

/// Result of a validating session read.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionLookup {
    /// Token and profile present, inactivity window respected.
    Valid(AdminProfile),
    /// Token or profile missing.
    Absent,
    /// Present but idle for longer than the timeout.
    Expired,
    /// Stored profile could not be parsed.
    Corrupted,
}

impl SessionLookup {
    /// The admin profile when valid.
    pub fn into_admin(self) -> Option<AdminProfile> {
        match self {
            Self::Valid(admin) => Some(admin),
            _ => None,
        }
    }

    /// Whether the session was dropped because of inactivity.
    pub fn is_expired(&self) -> bool {
        matches!(self, Self::Expired)
    }
}

/// Owner of the persisted session record.
#[derive(Debug, Clone)]
pub struct SessionStore {
    /// Durable client storage.
    storage: Arc<dyn ClientStorage>,
    /// Keys of the record.
    keys: SessionKeys,
    /// Time source.
    clock: Arc<dyn Clock>,
    /// Inactivity timeout in milliseconds.
    timeout_ms: i64,
    /// Module reported when none is stored.
    default_module: String,
}

impl SessionStore {
    /// Creates a new session store.
    pub fn new(
        storage: Arc<dyn ClientStorage>,
        keys: SessionKeys,
        clock: Arc<dyn Clock>,
        config: &SessionConfig,
    ) -> Self {
        Self {
            storage,
            keys,
            clock,
            timeout_ms: config.inactivity_timeout_ms(),
            default_module: config.default_module.clone(),
        }
    }

    /// Creates a session store on top of a configured storage manager.
    pub fn from_manager(
        manager: &StorageManager,
        clock: Arc<dyn Clock>,
        config: &SessionConfig,
    ) -> Self {
        Self::new(manager.provider(), manager.keys().clone(), clock, config)
    }

    /// Inactivity timeout in milliseconds.
    pub fn timeout_ms(&self) -> i64 {
        self.timeout_ms
    }

    /// Current time according to the store's clock.
    pub fn now_millis(&self) -> i64 {
        self.clock.now_millis()
    }

    /// Keys of the record.
    pub fn keys(&self) -> &SessionKeys {
        &self.keys
    }

    /// Reads a key, demoting storage failures to "absent".
    fn read(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Session storage read failed, treating as absent");
                None
            }
        }
    }

    /// Returns the stored token, or an empty string.
    pub fn get_token(&self) -> String {
        self.read(&self.keys.token).unwrap_or_default()
    }

    /// Whether token and profile are both stored. No side effects.
    pub fn has_session(&self) -> bool {
        let token = self.read(&self.keys.token).filter(|t| !t.is_empty());
        token.is_some() && self.read(&self.keys.profile).is_some()
    }

    /// Validating read of the session record.
    ///
    /// Anything other than [`SessionLookup::Valid`] clears the whole record.
    pub fn lookup(&self) -> SessionLookup {
        let token = self.read(&self.keys.token).filter(|t| !t.is_empty());
        let profile = self.read(&self.keys.profile);

        let raw = match (token, profile) {
            (Some(_), Some(raw)) => raw,
            _ => {
                self.clear_session();
                return SessionLookup::Absent;
            }
        };

        let admin = match serde_json::from_str::<AdminProfile>(&raw) {
            Ok(admin) => admin,
            Err(e) => {
                warn!(error = %e, "Stored admin profile is malformed, clearing session");
                self.clear_session();
                return SessionLookup::Corrupted;
            }
        };

        if let ExpiryVerdict::Expired { idle_ms } = self.check_expiry() {
            info!(
                admin = %admin.label(),
                idle_ms,
                "Admin session expired after inactivity"
            );
            self.clear_session();
            return SessionLookup::Expired;
        }

        SessionLookup::Valid(admin)
    }

    /// Returns the admin profile of a present, non-expired session.
    pub fn get_admin(&self) -> Option<AdminProfile> {
        self.lookup().into_admin()
    }

    /// Raw stored last-activity timestamp. Malformed values read as `None`.
    pub fn last_activity_at(&self) -> Option<i64> {
        self.read(&self.keys.last_activity)
            .and_then(|raw| raw.trim().parse::<i64>().ok())
    }

    /// Compares the stored last activity with the clock.
    pub fn check_expiry(&self) -> ExpiryVerdict {
        ExpiryVerdict::evaluate(
            self.last_activity_at(),
            self.clock.now_millis(),
            self.timeout_ms,
        )
    }

    /// Sets the last-activity timestamp to now.
    ///
    /// Does nothing without a token and profile. A stored timestamp later
    /// than now is left in place.
    pub fn touch_activity(&self) {
        if !self.has_session() {
            debug!("No admin session, activity not recorded");
            return;
        }
        let now = self.clock.now_millis();
        if let Some(previous) = self.last_activity_at() {
            if previous > now {
                debug!(previous, now, "Clock is behind last activity, keeping it");
                return;
            }
        }
        if let Err(e) = self.storage.set(&self.keys.last_activity, &now.to_string()) {
            warn!(error = %e, "Failed to record admin activity");
        }
    }

    /// Persists a freshly authenticated session.
    ///
    /// Both token and admin are required; an incomplete payload is
    /// rejected before anything is written.
    pub fn persist_session(&self, payload: SessionPayload) -> AppResult<AdminProfile> {
        let token = payload
            .token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| AppError::validation("Invalid session payload: missing token"))?;
        let admin = payload
            .admin
            .ok_or_else(|| AppError::validation("Invalid session payload: missing admin profile"))?;

        let profile = serde_json::to_string(&admin)?;
        let now = self.clock.now_millis();

        self.storage.apply(
            WriteBatch::new()
                .set(&self.keys.token, token)
                .set(&self.keys.profile, profile)
                .set(&self.keys.last_activity, now.to_string()),
        )?;

        info!(admin = %admin.label(), "Admin session created");
        Ok(admin)
    }

    /// Removes the whole record in one batch. Safe to call when empty.
    pub fn clear_session(&self) {
        let batch = self
            .keys
            .all()
            .into_iter()
            .fold(WriteBatch::new(), |batch, key| batch.remove(key));

        match self.storage.apply(batch) {
            Ok(()) => debug!("Admin session cleared"),
            Err(e) => warn!(error = %e, "Failed to clear admin session"),
        }
    }

    /// Last selected admin module, or the configured default.
    pub fn get_active_module(&self) -> String {
        self.read(&self.keys.active_module)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| self.default_module.clone())
    }

    /// Persists the selected admin module.
    pub fn set_active_module(&self, name: &str) -> AppResult<()> {
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(AppError::validation(format!(
                "Invalid module identifier: '{name}'"
            )));
        }
        self.storage.set(&self.keys.active_module, name)
    }

    /// Raw view of the stored fields, without validation side effects.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            token: self.read(&self.keys.token),
            profile: self.read(&self.keys.profile),
            last_activity_at: self.last_activity_at(),
            active_module: self.read(&self.keys.active_module),
        }
    }
}
