//! Session status command.

use chrono::{DateTime, Utc};
use serde::Serialize;

use asgf_core::config::AppConfig;
use asgf_core::error::AppError;
use asgf_core::types::{AdminProfile, Location};
use asgf_session::ExpiryVerdict;

use crate::output::{self, FieldRow, OutputFormat};

/// Stored session as reported to the terminal
#[derive(Debug, Serialize)]
struct SessionStatus {
    state: &'static str,
    admin: Option<AdminProfile>,
    token_present: bool,
    last_activity_at: Option<DateTime<Utc>>,
    idle_seconds: Option<i64>,
    remaining_seconds: Option<i64>,
    active_module: String,
}

/// Execute the status command. Reads only; an expired record is reported, not cleared.
pub fn execute(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let (ctx, _) = super::session_context(config, Location::new(&config.routes.landing_path))?;
    let store = &ctx.store;
    let snapshot = store.snapshot();

    let admin = snapshot
        .profile
        .as_deref()
        .and_then(|raw| serde_json::from_str::<AdminProfile>(raw).ok());
    let token_present = snapshot.token.as_deref().is_some_and(|t| !t.is_empty());
    let verdict = store.check_expiry();

    let state = match (token_present, &admin, snapshot.profile.is_some()) {
        (false, _, _) => "signed out",
        (true, None, true) => "corrupted",
        (true, None, false) => "incomplete",
        (true, Some(_), _) if verdict.is_expired() => "expired",
        (true, Some(_), _) => "signed in",
    };

    let (idle_seconds, remaining_seconds) = match verdict {
        ExpiryVerdict::Active { idle_ms } | ExpiryVerdict::Expired { idle_ms } => (
            Some(idle_ms / 1000),
            Some((store.timeout_ms().saturating_sub(idle_ms) / 1000).max(0)),
        ),
        ExpiryVerdict::Unknown => (None, None),
    };

    let status = SessionStatus {
        state,
        admin,
        token_present,
        last_activity_at: snapshot
            .last_activity_at
            .and_then(DateTime::<Utc>::from_timestamp_millis),
        idle_seconds,
        remaining_seconds,
        active_module: store.get_active_module(),
    };

    let mut rows = vec![FieldRow::new("State", status.state)];
    if let Some(admin) = &status.admin {
        rows.push(FieldRow::new("Admin", admin.label()));
        rows.push(FieldRow::new("Role", admin.role().unwrap_or_default()));
    }
    if let Some(at) = status.last_activity_at {
        rows.push(FieldRow::new("Last activity", at.to_rfc3339()));
    }
    if let (Some(idle), Some(remaining)) = (status.idle_seconds, status.remaining_seconds) {
        rows.push(FieldRow::new("Idle", format!("{idle}s")));
        rows.push(FieldRow::new("Expires in", format!("{remaining}s")));
    }
    rows.push(FieldRow::new("Active module", status.active_module.clone()));

    output::print_item(&status, &rows, format);
    Ok(())
}
