//! Integration tests for the session record over file storage.

mod helpers;

use std::time::Duration;

use asgf_core::traits::navigator::{NavigationMode, Navigator};
use asgf_core::traits::storage::ClientStorage;
use asgf_core::types::{AdminProfile, Location, SessionPayload};
use asgf_session::{
    ActivityTracker, ExpiryVerdict, InteractionKind, LoginForm, LoginOutcome, SessionLookup,
};

use helpers::{ScriptedAuthApi, T0, TestSession, treasurer};

#[test]
fn test_session_survives_reload() {
    let session = TestSession::new("/admin/dashboard");
    let admin = session.sign_in(treasurer());
    session.ctx.store.set_active_module("members").unwrap();

    let reloaded = session.reopen("/admin/members");
    assert_eq!(reloaded.ctx.store.get_token(), "t1");
    assert_eq!(reloaded.ctx.store.get_admin(), Some(admin));
    assert_eq!(reloaded.ctx.store.get_active_module(), "members");
    assert_eq!(reloaded.ctx.store.last_activity_at(), Some(T0));
}

#[test]
fn test_minimal_profile_round_trips() {
    let session = TestSession::new("/admin/dashboard");
    session.sign_in(AdminProfile::with_id(1));

    let raw = session
        .storage
        .get(&session.storage.keys().profile)
        .unwrap()
        .unwrap();
    assert_eq!(raw, r#"{"id":1}"#);
    assert_eq!(session.ctx.store.get_admin(), Some(AdminProfile::with_id(1)));
}

#[test]
fn test_profile_with_nulls_reads_back_unchanged() {
    let session = TestSession::new("/admin/dashboard");
    let admin: AdminProfile = serde_json::from_str(
        r#"{"id":null,"email":"x@asgf.fr","role":null,"modules":null,"phone":null}"#,
    )
    .unwrap();
    session.sign_in(admin.clone());

    let reloaded = session.reopen("/admin/dashboard");
    let read = reloaded.ctx.store.get_admin().unwrap();
    assert_eq!(read, admin);
    assert_eq!(read.get("phone"), Some(&serde_json::Value::Null));
    assert!(read.modules().is_empty());
}

#[test]
fn test_expired_record_is_removed_from_disk() {
    let session = TestSession::new("/admin/dashboard");
    session.sign_in(treasurer());
    session.ctx.store.set_active_module("payments").unwrap();

    session.clock.set(T0 + 900_001);
    let reloaded = session.reopen("/admin/payments");
    assert_eq!(reloaded.ctx.store.lookup(), SessionLookup::Expired);

    for key in reloaded.storage.keys().all() {
        assert_eq!(reloaded.storage.get(key).unwrap(), None, "{key} should be removed");
    }
    assert_eq!(reloaded.ctx.store.get_active_module(), "dashboard");
}

#[test]
fn test_exactly_at_timeout_is_still_valid() {
    let session = TestSession::new("/admin/dashboard");
    session.sign_in(treasurer());

    session.clock.set(T0 + 900_000);
    assert_eq!(
        session.ctx.store.check_expiry(),
        ExpiryVerdict::Active { idle_ms: 900_000 }
    );
    assert!(session.ctx.store.get_admin().is_some());
}

#[test]
fn test_token_without_profile_clears_everything() {
    let session = TestSession::new("/admin/dashboard");
    session.storage.set(&session.storage.keys().token, "t1").unwrap();
    session
        .storage
        .set(&session.storage.keys().active_module, "members")
        .unwrap();

    assert_eq!(session.ctx.store.get_admin(), None);
    assert!(session.ctx.store.snapshot().is_empty());
}

#[test]
fn test_corrupted_profile_demotes_to_absent() {
    let session = TestSession::new("/admin/dashboard");
    session.sign_in(treasurer());
    session
        .storage
        .set(&session.storage.keys().profile, "{not json")
        .unwrap();

    assert_eq!(session.ctx.store.lookup(), SessionLookup::Corrupted);
    assert_eq!(session.ctx.store.get_token(), "");
}

#[test]
fn test_incomplete_payload_writes_nothing() {
    let session = TestSession::new("/admin/dashboard");
    let err = session
        .ctx
        .store
        .persist_session(SessionPayload {
            token: None,
            admin: Some(treasurer()),
        })
        .unwrap_err();

    assert!(err.message.contains("missing token"));
    let keys = session.storage.keys();
    assert!(keys.all().iter().all(|k| session.storage.get(k).unwrap().is_none()));
}

#[tokio::test]
async fn test_login_then_reload_lands_on_origin() {
    let session = TestSession::new("/admin/dashboard");
    session.history.navigate(
        Location::new("/admin/login").with_from("/admin/members"),
        NavigationMode::Replace,
    );
    let api = ScriptedAuthApi::new(vec![Ok(SessionPayload::new("t1", treasurer()))]);
    let flow = session.ctx.login_flow(api.clone());

    let mut form = LoginForm::new("tresorier@asgf.fr", "hunter2");
    let outcome = flow.submit(&mut form).await;

    assert!(matches!(outcome, LoginOutcome::Redirected(ref to) if to.path == "/admin/members"));
    assert_eq!(api.calls(), vec!["tresorier@asgf.fr".to_string()]);

    let reloaded = session.reopen("/admin/members");
    assert_eq!(reloaded.ctx.store.get_admin(), Some(treasurer()));
}

#[tokio::test(start_paused = true)]
async fn test_activity_keeps_session_alive_past_timeout() {
    let session = TestSession::new("/admin/members");
    session.sign_in(treasurer());
    let tracker = ActivityTracker::mount(&session.ctx, std::sync::Arc::new(|| {})).unwrap();

    // Ten minutes idle, one interaction, ten more minutes idle.
    session.clock.advance(600_000);
    tokio::time::sleep(Duration::from_secs(600)).await;
    session.ctx.surface.dispatch(InteractionKind::PointerDown);
    tokio::time::sleep(Duration::from_millis(1)).await;

    session.clock.advance(600_000);
    tokio::time::sleep(Duration::from_secs(600)).await;

    assert!(tracker.is_running());
    assert!(session.ctx.store.get_admin().is_some());
    assert!(session.history.navigations().is_empty());
    tracker.unmount().await;
}
