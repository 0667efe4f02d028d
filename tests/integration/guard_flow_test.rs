//! Integration tests for the guard, tracker and login flow working together.

mod helpers;

use std::time::Duration;

use asgf_core::error::AppError;
use asgf_core::traits::navigator::{NavigationMode, Navigator};
use asgf_core::types::{Location, SessionPayload};
use asgf_session::navigation::SESSION_EXPIRED_NOTICE;
use asgf_session::{GuardState, GuardView, LoginForm, LoginOutcome};

use helpers::{ScriptedAuthApi, TestSession, treasurer};

#[tokio::test(start_paused = true)]
async fn test_timeout_redirect_carries_marker() {
    let session = TestSession::new("/admin/members");
    session.sign_in(treasurer());

    let guard = session.ctx.guard(Location::new("/admin/members"));
    assert!(matches!(guard.confirm().await, GuardState::Authenticated(_)));

    session.clock.advance(900_100);
    tokio::time::sleep(Duration::from_secs(61)).await;

    assert!(session.ctx.store.snapshot().is_empty());
    assert_eq!(guard.state(), GuardState::Unauthenticated);

    let nav = session.history.last_navigation().unwrap();
    assert_eq!(nav.mode, NavigationMode::Reload);
    assert!(session.ctx.routes.is_timeout_redirect(&nav.location));
    assert_eq!(session.history.reload_count(), 1);
    guard.unmount().await;
}

#[tokio::test(start_paused = true)]
async fn test_never_logged_in_redirect_has_no_marker() {
    let session = TestSession::new("/admin/members");

    let guard = session.ctx.guard(Location::new("/admin/members"));
    assert_eq!(guard.confirm().await, GuardState::Unauthenticated);

    let nav = session.history.last_navigation().unwrap();
    assert_eq!(nav.mode, NavigationMode::Replace);
    assert_eq!(nav.location.href(), "/admin/login");
    assert!(!session.ctx.routes.is_timeout_redirect(&nav.location));
    assert_eq!(session.history.reload_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_guard_login_and_return() {
    let session = TestSession::new("/admin/payments");

    let guard = session.ctx.guard(Location::new("/admin/payments"));
    guard.confirm().await;
    let login_location = session.history.current();
    assert_eq!(login_location.path, "/admin/login");
    assert_eq!(login_location.from.as_deref(), Some("/admin/payments"));

    let api = ScriptedAuthApi::new(vec![
        Err(AppError::authentication("Invalid login credentials")),
        Ok(SessionPayload::new("t1", treasurer())),
    ]);
    let flow = session.ctx.login_flow(api.clone());
    assert_eq!(flow.notice(), None);

    let mut form = LoginForm::new("tresorier@asgf.fr", "wrong");
    assert_eq!(
        flow.submit(&mut form).await,
        LoginOutcome::Rejected("Invalid login credentials".into())
    );
    assert_eq!(session.history.current(), login_location);

    form.password = "hunter2".into();
    assert_eq!(
        flow.submit(&mut form).await,
        LoginOutcome::Redirected(Location::new("/admin/payments"))
    );
    assert!(form.error.is_none());
    assert_eq!(api.calls().len(), 2);

    // The login entry was replaced, so going back skips it.
    assert_eq!(session.history.current().href(), "/admin/payments");
    assert_eq!(session.history.entries().len(), 1);

    let protected = session.ctx.guard(Location::new("/admin/payments"));
    assert_eq!(
        protected.confirm().await,
        GuardState::Authenticated(treasurer())
    );
    assert!(protected.is_tracking());
    protected.unmount().await;
}

#[tokio::test(start_paused = true)]
async fn test_expired_login_screen_shows_notice() {
    let session = TestSession::new("/admin/members");
    session.sign_in(treasurer());
    session.clock.advance(900_001);

    let guard = session.ctx.guard(Location::new("/admin/members"));
    assert_eq!(guard.confirm().await, GuardState::Unauthenticated);

    let api = ScriptedAuthApi::new(vec![Ok(SessionPayload::new("t2", treasurer()))]);
    let flow = session.ctx.login_flow(api);
    assert_eq!(flow.notice(), Some(SESSION_EXPIRED_NOTICE));

    let outcome = flow
        .submit(&mut LoginForm::new("tresorier@asgf.fr", "hunter2"))
        .await;
    assert_eq!(outcome, LoginOutcome::Redirected(Location::new("/admin/members")));
    assert_eq!(session.ctx.store.get_token(), "t2");
}

#[tokio::test(start_paused = true)]
async fn test_logout_from_protected_view() {
    let session = TestSession::new("/admin/members");
    session.sign_in(treasurer());

    let guard = session.ctx.guard(Location::new("/admin/members"));
    guard.confirm().await;

    let GuardView::Protected(view) = guard.render() else {
        panic!("expected protected content");
    };
    assert_eq!(view.admin, treasurer());
    view.logout.logout().await;

    assert!(session.ctx.store.snapshot().is_empty());
    assert_eq!(session.ctx.surface.listener_count(), 0);
    assert_eq!(session.history.current().href(), "/admin/login");
    assert!(matches!(guard.render(), GuardView::Redirect(_)));

    // Nothing fires later on a logged-out guard.
    session.clock.advance(3_600_000);
    tokio::time::sleep(Duration::from_secs(120)).await;
    assert_eq!(session.history.reload_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_session_cleared_elsewhere_redirects_on_render() {
    let session = TestSession::new("/admin/members");
    session.sign_in(treasurer());

    let guard = session.ctx.guard(Location::new("/admin/members"));
    guard.confirm().await;

    // Another tab signs out.
    let other_tab = asgf_session::SessionStore::from_manager(
        &session.storage,
        session.clock.clone(),
        &session.config.session,
    );
    other_tab.clear_session();

    match guard.render() {
        GuardView::Redirect(location) => {
            assert_eq!(location.path, "/admin/login");
            assert!(!session.ctx.routes.is_timeout_redirect(&location));
        }
        other => panic!("expected redirect, got {other:?}"),
    }
    assert!(!guard.is_tracking());
}
