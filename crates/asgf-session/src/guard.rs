//! Route gate for protected admin areas.
//!
//! A guard starts in [`GuardState::Checking`], confirms the session once
//! and settles on [`GuardState::Authenticated`] or
//! [`GuardState::Unauthenticated`]. While authenticated it owns an
//! [`ActivityTracker`]; proactive expiry moves it straight to
//! `Unauthenticated`.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::watch;
use tracing::{debug, info};

use asgf_core::traits::navigator::NavigationMode;
use asgf_core::types::{AdminProfile, Location};

use crate::activity::{ActivityTracker, ExpiryCallback};
use crate::context::SessionContext;
use crate::store::SessionLookup;

/// Guard state.
#[derive(Debug, Clone, PartialEq)]
pub enum GuardState {
    /// Session not yet confirmed.
    Checking,
    /// A valid admin session is present.
    Authenticated(AdminProfile),
    /// No valid session; the user was sent to the login screen.
    Unauthenticated,
}

/// What a protected area should display.
#[derive(Debug, Clone)]
pub enum GuardView {
    /// Placeholder while checking.
    Loading,
    /// The protected content, with the admin and a logout action.
    Protected(ProtectedView),
    /// Login location the user was sent to.
    Redirect(Location),
}

/// Data passed down to protected content.
#[derive(Debug, Clone)]
pub struct ProtectedView {
    /// The logged-in admin.
    pub admin: AdminProfile,
    /// Logout action.
    pub logout: LogoutHandle,
}

#[derive(Debug)]
struct GuardInner {
    ctx: SessionContext,
    location: Location,
    seed: SessionLookup,
    state: Arc<watch::Sender<GuardState>>,
    redirect: Arc<Mutex<Option<Location>>>,
    tracker: Mutex<Option<ActivityTracker>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl GuardInner {
    fn current(&self) -> GuardState {
        self.state.borrow().clone()
    }

    fn take_tracker(&self) -> Option<ActivityTracker> {
        lock(&self.tracker).take()
    }

    /// Move to `Unauthenticated` and replace the current entry with the
    /// login screen, remembering where the user was heading.
    fn redirect_to_login(&self, expired: bool) -> Location {
        let base = if expired {
            self.ctx.routes.login_after_timeout()
        } else {
            self.ctx.routes.login()
        };
        let target = base.with_from(self.location.href());

        *lock(&self.redirect) = Some(target.clone());
        self.state.send_replace(GuardState::Unauthenticated);
        info!(
            from = %self.location,
            expired,
            "Admin not authenticated, redirecting to login"
        );
        self.ctx
            .navigator
            .navigate(target.clone(), NavigationMode::Replace);
        target
    }

    fn redirect_location(&self) -> Location {
        lock(&self.redirect)
            .clone()
            .unwrap_or_else(|| self.ctx.routes.login())
    }
}

/// Route gate over one protected location.
#[derive(Debug, Clone)]
pub struct AuthGuard {
    inner: Arc<GuardInner>,
}

impl AuthGuard {
    /// Mount a guard. Never fails; unreadable storage reads as no session.
    pub fn mount(ctx: SessionContext, location: Location) -> Self {
        let seed = ctx.store.lookup();
        debug!(location = %location, seeded = matches!(seed, SessionLookup::Valid(_)), "Guard mounted");

        let (state, _) = watch::channel(GuardState::Checking);
        Self {
            inner: Arc::new(GuardInner {
                ctx,
                location,
                seed,
                state: Arc::new(state),
                redirect: Arc::new(Mutex::new(None)),
                tracker: Mutex::new(None),
            }),
        }
    }

    /// Current state.
    pub fn state(&self) -> GuardState {
        self.inner.current()
    }

    /// Watch state transitions.
    pub fn subscribe(&self) -> watch::Receiver<GuardState> {
        self.inner.state.subscribe()
    }

    /// Admin read synchronously at mount, if the session was valid then.
    pub fn seeded_admin(&self) -> Option<&AdminProfile> {
        match &self.inner.seed {
            SessionLookup::Valid(admin) => Some(admin),
            _ => None,
        }
    }

    /// Confirm the session and leave `Checking`.
    ///
    /// Only the first call transitions; later calls return the current
    /// state unchanged.
    pub async fn confirm(&self) -> GuardState {
        if self.inner.current() != GuardState::Checking {
            return self.inner.current();
        }

        tokio::task::yield_now().await;

        if self.inner.current() != GuardState::Checking {
            return self.inner.current();
        }

        let lookup = self.inner.ctx.store.lookup();
        let expired = lookup.is_expired() || self.inner.seed.is_expired();

        match lookup.into_admin() {
            Some(admin) => {
                let tracker = ActivityTracker::mount(&self.inner.ctx, self.expiry_callback());
                *lock(&self.inner.tracker) = tracker;
                info!(admin = %admin.label(), location = %self.inner.location, "Admin authenticated");
                self.inner
                    .state
                    .send_replace(GuardState::Authenticated(admin));
            }
            None => {
                self.inner.redirect_to_login(expired);
            }
        }

        self.inner.current()
    }

    /// Decide what to display, re-validating the session against the store.
    pub fn render(&self) -> GuardView {
        match self.inner.current() {
            GuardState::Checking => GuardView::Loading,
            GuardState::Unauthenticated => GuardView::Redirect(self.inner.redirect_location()),
            GuardState::Authenticated(held) => match self.inner.ctx.store.lookup() {
                SessionLookup::Valid(admin) => {
                    if admin != held {
                        self.inner
                            .state
                            .send_replace(GuardState::Authenticated(admin.clone()));
                    }
                    GuardView::Protected(ProtectedView {
                        admin,
                        logout: self.logout_handle(),
                    })
                }
                other => {
                    drop(self.inner.take_tracker());
                    GuardView::Redirect(self.inner.redirect_to_login(other.is_expired()))
                }
            },
        }
    }

    /// Logout action for protected content.
    pub fn logout_handle(&self) -> LogoutHandle {
        LogoutHandle {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Clear the session and go to the login screen immediately.
    pub async fn logout(&self) {
        self.logout_handle().logout().await;
    }

    /// Whether an activity tracker is currently running.
    pub fn is_tracking(&self) -> bool {
        lock(&self.inner.tracker)
            .as_ref()
            .is_some_and(ActivityTracker::is_running)
    }

    /// Tear down the tracker owned by this guard.
    pub async fn unmount(self) {
        if let Some(tracker) = self.inner.take_tracker() {
            tracker.unmount().await;
        }
        debug!(location = %self.inner.location, "Guard unmounted");
    }

    fn expiry_callback(&self) -> ExpiryCallback {
        let state = Arc::clone(&self.inner.state);
        let redirect = Arc::clone(&self.inner.redirect);
        let target = self.inner.ctx.routes.login_after_timeout();
        Arc::new(move || {
            *lock(&redirect) = Some(target.clone());
            state.send_replace(GuardState::Unauthenticated);
        })
    }
}

/// Logout action handed to protected content.
#[derive(Debug, Clone)]
pub struct LogoutHandle {
    inner: Arc<GuardInner>,
}

impl LogoutHandle {
    /// Stop tracking, clear the session, and redirect to the login screen.
    pub async fn logout(&self) {
        if let Some(tracker) = self.inner.take_tracker() {
            tracker.unmount().await;
        }
        self.inner.ctx.store.clear_session();
        info!("Admin logged out");

        let target = self.inner.ctx.routes.login();
        *lock(&self.inner.redirect) = Some(target.clone());
        self.inner.state.send_replace(GuardState::Unauthenticated);
        self.inner
            .ctx
            .navigator
            .navigate(target, NavigationMode::Replace);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use asgf_core::config::SessionConfig;
    use asgf_core::traits::clock::ManualClock;
    use asgf_core::traits::navigator::Navigator;
    use asgf_core::types::SessionPayload;
    use asgf_storage::SessionKeys;
    use asgf_storage::memory::MemoryStorage;

    use crate::navigation::{LoginRoutes, MemoryHistory};
    use crate::store::SessionStore;

    const NOW: i64 = 1_700_000_000_000;

    fn setup() -> (SessionContext, Arc<ManualClock>, Arc<MemoryHistory>, MemoryStorage) {
        let storage = MemoryStorage::new();
        let clock = Arc::new(ManualClock::new(NOW));
        let store = SessionStore::new(
            Arc::new(storage.clone()),
            SessionKeys::default(),
            clock.clone(),
            &SessionConfig::default(),
        );
        let history = Arc::new(MemoryHistory::new(Location::new("/admin/members")));
        let ctx = SessionContext::new(
            Arc::new(store),
            history.clone(),
            LoginRoutes::default(),
            Duration::from_secs(60),
        );
        (ctx, clock, history, storage)
    }

    fn login(ctx: &SessionContext) -> AdminProfile {
        let admin = AdminProfile::with_id(3).with_field("email", "tresorier@asgf.fr");
        ctx.store
            .persist_session(SessionPayload::new("t1", admin))
            .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_authenticated_flow() {
        let (ctx, _, history, _) = setup();
        let admin = login(&ctx);

        let guard = ctx.guard(Location::new("/admin/members"));
        assert_eq!(guard.state(), GuardState::Checking);
        assert!(matches!(guard.render(), GuardView::Loading));
        assert_eq!(guard.seeded_admin(), Some(&admin));

        assert_eq!(guard.confirm().await, GuardState::Authenticated(admin.clone()));
        assert!(guard.is_tracking());
        assert!(history.navigations().is_empty());

        match guard.render() {
            GuardView::Protected(view) => assert_eq!(view.admin, admin),
            other => panic!("expected protected view, got {other:?}"),
        }
        guard.unmount().await;
        assert_eq!(ctx.surface.listener_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_session_redirects_without_marker() {
        let (ctx, _, history, _) = setup();

        let guard = ctx.guard(Location::new("/admin/members"));
        assert_eq!(guard.confirm().await, GuardState::Unauthenticated);
        assert!(!guard.is_tracking());

        let nav = history.last_navigation().unwrap();
        assert_eq!(nav.mode, NavigationMode::Replace);
        assert_eq!(nav.location.href(), "/admin/login");
        assert_eq!(nav.location.from.as_deref(), Some("/admin/members"));
        assert!(!ctx.routes.is_timeout_redirect(&nav.location));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_at_mount_redirects_with_marker() {
        let (ctx, clock, history, storage) = setup();
        login(&ctx);
        clock.advance(900_001);

        let guard = ctx.guard(Location::new("/admin/calendar"));
        assert_eq!(guard.confirm().await, GuardState::Unauthenticated);
        assert!(storage.is_empty());

        let current = history.current();
        assert!(ctx.routes.is_timeout_redirect(&current));
        assert_eq!(current.from.as_deref(), Some("/admin/calendar"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_confirm_transitions_once() {
        let (ctx, _, history, _) = setup();
        let guard = ctx.guard(Location::new("/admin/members"));
        guard.confirm().await;

        // A session appearing later does not re-enter Checking.
        login(&ctx);
        assert_eq!(guard.confirm().await, GuardState::Unauthenticated);
        assert_eq!(history.navigations().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_render_rechecks_store() {
        let (ctx, _, history, _) = setup();
        login(&ctx);
        let guard = ctx.guard(Location::new("/admin/studio"));
        guard.confirm().await;

        ctx.store.clear_session();

        match guard.render() {
            GuardView::Redirect(location) => {
                assert_eq!(location.path, "/admin/login");
                assert_eq!(location.from.as_deref(), Some("/admin/studio"));
            }
            other => panic!("expected redirect, got {other:?}"),
        }
        assert_eq!(guard.state(), GuardState::Unauthenticated);
        assert_eq!(history.current().path, "/admin/login");
    }

    #[tokio::test(start_paused = true)]
    async fn test_logout() {
        let (ctx, _, history, storage) = setup();
        login(&ctx);
        ctx.store.set_active_module("members").unwrap();
        let guard = ctx.guard(Location::new("/admin/members"));
        guard.confirm().await;

        let GuardView::Protected(view) = guard.render() else {
            panic!("expected protected view");
        };
        view.logout.logout().await;

        assert_eq!(guard.state(), GuardState::Unauthenticated);
        assert!(storage.is_empty());
        assert!(!guard.is_tracking());
        assert_eq!(ctx.surface.listener_count(), 0);
        assert_eq!(history.current().href(), "/admin/login");
    }

    #[tokio::test(start_paused = true)]
    async fn test_proactive_expiry_moves_guard_to_unauthenticated() {
        let (ctx, clock, history, _) = setup();
        login(&ctx);
        let guard = ctx.guard(Location::new("/admin/members"));
        guard.confirm().await;
        let mut states = guard.subscribe();

        clock.advance(900_100);
        tokio::time::sleep(Duration::from_secs(61)).await;

        assert!(states.has_changed().unwrap());
        assert_eq!(*states.borrow_and_update(), GuardState::Unauthenticated);
        assert_eq!(history.reload_count(), 1);
        match guard.render() {
            GuardView::Redirect(location) => assert!(ctx.routes.is_timeout_redirect(&location)),
            other => panic!("expected redirect, got {other:?}"),
        }
    }
}
