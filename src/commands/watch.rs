//! Guard a protected area from the terminal.
//!
//! Every line read from stdin counts as a key press on the input surface.
//! The command exits on `logout`, end of input, Ctrl+C, or when the
//! inactivity timeout signs the admin out.

use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};

use asgf_core::config::AppConfig;
use asgf_core::error::AppError;
use asgf_core::traits::navigator::Navigator;
use asgf_core::types::Location;
use asgf_session::{GuardState, GuardView, InteractionKind};

use crate::output;

/// Arguments for the watch command
#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Protected location to guard (defaults to the landing page)
    #[arg(long)]
    pub path: Option<String>,
}

/// Execute the watch command
pub async fn execute(args: &WatchArgs, config: &AppConfig) -> Result<(), AppError> {
    let location = match &args.path {
        Some(href) => Location::parse(href),
        None => Location::new(&config.routes.landing_path),
    };
    let (ctx, history) = super::session_context(config, location.clone())?;

    let guard = ctx.guard(location);
    let mut states = guard.subscribe();
    let admin = match guard.confirm().await {
        GuardState::Authenticated(admin) => admin,
        _ => {
            output::print_warning("Not signed in");
            output::print_kv("Redirect", &history.current().href());
            return Ok(());
        }
    };

    output::print_success(&format!("Watching session of {}", admin.label()));
    output::print_kv("Location", &history.current().href());
    output::print_kv("Active module", &ctx.store.get_active_module());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            changed = states.changed() => {
                if changed.is_err() || *states.borrow_and_update() == GuardState::Unauthenticated {
                    break;
                }
            }
            line = lines.next_line() => match line {
                Ok(Some(line)) if line.trim() == "logout" => {
                    guard.logout().await;
                    break;
                }
                Ok(Some(_)) => {
                    ctx.surface.dispatch(InteractionKind::KeyDown);
                    if let GuardView::Redirect(to) = guard.render() {
                        output::print_kv("Redirect", &to.href());
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read stdin");
                    break;
                }
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    match guard.state() {
        GuardState::Unauthenticated => {
            if ctx.routes.is_timeout_redirect(&history.current()) {
                output::print_warning(asgf_session::navigation::SESSION_EXPIRED_NOTICE);
            } else {
                output::print_success("Signed out");
            }
            output::print_kv("Location", &history.current().href());
        }
        _ => output::print_kv("Session", "still active"),
    }

    guard.unmount().await;
    Ok(())
}
