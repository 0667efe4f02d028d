//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use asgf_core::config::{AppConfig, StorageConfig};
use asgf_core::error::AppError;
use asgf_core::result::AppResult;
use asgf_core::traits::auth_api::{AuthApi, Credentials};
use asgf_core::traits::clock::ManualClock;
use asgf_core::types::{AdminProfile, Location, SessionPayload};
use asgf_session::{LoginRoutes, MemoryHistory, SessionContext, SessionStore};
use asgf_storage::StorageManager;

/// Fixed starting instant for the manual clock.
pub const T0: i64 = 1_717_000_000_000;

/// Session context backed by file storage in a temporary directory.
pub struct TestSession {
    /// Shared session service
    pub ctx: SessionContext,
    /// Controls "now"
    pub clock: Arc<ManualClock>,
    /// Records navigations
    pub history: Arc<MemoryHistory>,
    /// Storage the context writes to
    pub storage: StorageManager,
    /// Configuration the context was built from
    pub config: AppConfig,
    _dir: TempDir,
}

impl TestSession {
    /// Create a session context whose history starts at `start`.
    pub fn new(start: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = AppConfig {
            storage: StorageConfig {
                provider: "file".into(),
                path: dir.path().join("session.json").display().to_string(),
                key_prefix: "asgf".into(),
            },
            ..AppConfig::default()
        };
        let storage = StorageManager::new(&config.storage).expect("Failed to init storage");
        Self::build(config, storage, Arc::new(ManualClock::new(T0)), dir, start)
    }

    /// Another context over the same storage file and clock, as after a page reload.
    pub fn reopen(self, start: &str) -> Self {
        let storage = StorageManager::new(&self.config.storage).expect("Failed to reopen storage");
        Self::build(self.config, storage, self.clock, self._dir, start)
    }

    fn build(
        config: AppConfig,
        storage: StorageManager,
        clock: Arc<ManualClock>,
        dir: TempDir,
        start: &str,
    ) -> Self {
        let history = Arc::new(MemoryHistory::new(Location::parse(start)));
        let store = SessionStore::from_manager(&storage, clock.clone(), &config.session);
        let ctx = SessionContext::new(
            Arc::new(store),
            history.clone(),
            LoginRoutes::from_config(&config.routes),
            config.session.check_interval(),
        );
        Self {
            ctx,
            clock,
            history,
            storage,
            config,
            _dir: dir,
        }
    }

    /// Persist a session for `admin` with token `t1`.
    pub fn sign_in(&self, admin: AdminProfile) -> AdminProfile {
        self.ctx
            .store
            .persist_session(SessionPayload::new("t1", admin))
            .expect("Failed to persist session")
    }
}

/// A treasurer profile with access to the members module.
pub fn treasurer() -> AdminProfile {
    AdminProfile::with_id(12)
        .with_field("email", "tresorier@asgf.fr")
        .with_field("name", "Trésorier")
        .with_field("role", "admin")
        .with_field("modules", vec!["members", "payments"])
}

/// Authentication API returning queued responses in order.
#[derive(Debug, Default)]
pub struct ScriptedAuthApi {
    responses: Mutex<Vec<AppResult<SessionPayload>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedAuthApi {
    /// An API that answers with `responses`, first to last.
    pub fn new(responses: Vec<AppResult<SessionPayload>>) -> Arc<Self> {
        let mut responses = responses;
        responses.reverse();
        Arc::new(Self {
            responses: Mutex::new(responses),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Emails the API was called with.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl AuthApi for ScriptedAuthApi {
    async fn authenticate(&self, credentials: &Credentials) -> AppResult<SessionPayload> {
        self.calls
            .lock()
            .expect("calls lock")
            .push(credentials.email.clone());
        self.responses
            .lock()
            .expect("responses lock")
            .pop()
            .unwrap_or_else(|| Err(AppError::internal("no scripted response left")))
    }
}
