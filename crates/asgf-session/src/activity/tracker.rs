//! Proactive inactivity expiry.
//!
//! While mounted, the tracker refreshes the last-activity timestamp on
//! every qualifying interaction and polls the stored timestamp on a fixed
//! interval. When the idle time passes the timeout it clears the session,
//! fires the expiry callback, and hard-navigates to the login screen with
//! the timeout marker.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace};

use asgf_core::traits::navigator::{NavigationMode, Navigator};

use crate::context::SessionContext;
use crate::expiry::ExpiryVerdict;
use crate::navigation::LoginRoutes;
use crate::store::SessionStore;

use super::surface::{InteractionKind, Listener, ListenerOptions};

/// Invoked once when proactive expiry fires, before the hard navigation.
pub type ExpiryCallback = Arc<dyn Fn() + Send + Sync>;

/// Handle to a mounted tracker. Dropping it stops tracking.
pub struct ActivityTracker {
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for ActivityTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivityTracker")
            .field("running", &self.is_running())
            .finish()
    }
}

impl ActivityTracker {
    /// Start tracking if a valid session is present.
    ///
    /// An expired or unreadable record is cleared instead of revived.
    /// Records the mount itself as activity. Must be called from within a
    /// Tokio runtime.
    pub fn mount(ctx: &SessionContext, on_expired: ExpiryCallback) -> Option<Self> {
        if ctx.store.lookup().into_admin().is_none() {
            debug!("No valid admin session, activity tracker not mounted");
            return None;
        }

        ctx.store.touch_activity();

        let listener = ctx
            .surface
            .listen(&InteractionKind::TRACKED, ListenerOptions::passive());
        let cancel = CancellationToken::new();

        let task = TrackerTask {
            enforcer: ExpiryEnforcer {
                store: Arc::clone(&ctx.store),
                navigator: Arc::clone(&ctx.navigator),
                routes: ctx.routes.clone(),
                on_expired,
            },
            listener,
            period: ctx.check_interval,
            cancel: cancel.clone(),
        };

        debug!(
            interval_secs = ctx.check_interval.as_secs(),
            "Activity tracker mounted"
        );

        Some(Self {
            cancel,
            handle: Some(tokio::spawn(task.run())),
        })
    }

    /// Whether the background task is still running.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop tracking and wait until the listener and timer are released.
    pub async fn unmount(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
        debug!("Activity tracker unmounted");
    }
}

impl Drop for ActivityTracker {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

struct TrackerTask {
    enforcer: ExpiryEnforcer,
    listener: Listener,
    period: Duration,
    cancel: CancellationToken,
}

impl TrackerTask {
    async fn run(self) {
        let TrackerTask {
            enforcer,
            mut listener,
            period,
            cancel,
        } = self;

        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut listening = true;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                event = listener.recv(), if listening => match event {
                    Some(kind) => {
                        trace!(event = %kind, "Admin activity");
                        enforcer.store.touch_activity();
                    }
                    None => listening = false,
                },
                _ = ticker.tick() => {
                    if enforcer.enforce() {
                        break;
                    }
                }
            }
        }
    }
}

struct ExpiryEnforcer {
    store: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
    routes: LoginRoutes,
    on_expired: ExpiryCallback,
}

impl ExpiryEnforcer {
    /// Returns `true` when the session was expired and torn down.
    fn enforce(&self) -> bool {
        let ExpiryVerdict::Expired { idle_ms } = self.store.check_expiry() else {
            return false;
        };

        info!(idle_ms, "Inactivity timeout reached, logging admin out");
        self.store.clear_session();
        (self.on_expired)();
        self.navigator
            .navigate(self.routes.login_after_timeout(), NavigationMode::Reload);
        true
    }
}
