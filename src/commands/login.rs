//! Admin sign-in command.

use std::sync::Arc;

use clap::Args;

use asgf_core::config::AppConfig;
use asgf_core::error::AppError;
use asgf_core::types::Location;
use asgf_session::{GuardState, HttpAuthApi, LoginForm, LoginOutcome, LoginRoutes};

use crate::output;

/// Arguments for the login command
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Admin email (will prompt if not provided)
    #[arg(short, long)]
    pub email: Option<String>,
    /// Password (will prompt if not provided)
    #[arg(short, long)]
    pub password: Option<String>,
    /// Protected location to open after signing in
    #[arg(long)]
    pub from: Option<String>,
}

/// Execute the login command
pub async fn execute(args: &LoginArgs, config: &AppConfig) -> Result<(), AppError> {
    let target = match &args.from {
        Some(href) => Location::parse(href),
        None => LoginRoutes::from_config(&config.routes).landing(),
    };
    let (ctx, history) = super::session_context(config, target.clone())?;

    let guard = ctx.guard(target);
    if let GuardState::Authenticated(admin) = guard.confirm().await {
        guard.unmount().await;
        output::print_success(&format!("Already signed in as {}", admin.label()));
        return Ok(());
    }

    let flow = ctx.login_flow(Arc::new(HttpAuthApi::new(&config.auth_api)?));
    if let Some(notice) = flow.notice() {
        output::print_warning(notice);
    }

    let email = match &args.email {
        Some(e) => e.clone(),
        None => dialoguer::Input::new()
            .with_prompt("Admin email")
            .interact_text()
            .map_err(|e| AppError::internal(format!("Input error: {}", e)))?,
    };
    let password = match &args.password {
        Some(p) => p.clone(),
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {}", e)))?,
    };

    let mut form = LoginForm::new(email, password);
    match flow.submit(&mut form).await {
        LoginOutcome::Redirected(location) => {
            let label = ctx
                .store
                .get_admin()
                .map(|admin| admin.label())
                .unwrap_or_default();
            output::print_success(&format!("Signed in as {}", label));
            output::print_kv("Redirect", &location.href());
            output::print_kv("History entries", &history.entries().len().to_string());
            Ok(())
        }
        LoginOutcome::Rejected(message) => Err(AppError::authentication(message)),
    }
}
