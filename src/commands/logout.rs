//! Sign-out command.

use asgf_core::config::AppConfig;
use asgf_core::error::AppError;
use asgf_core::types::Location;

use crate::output;

/// Execute the logout command
pub fn execute(config: &AppConfig) -> Result<(), AppError> {
    let (ctx, _) = super::session_context(config, Location::new(&config.routes.landing_path))?;

    let had_session = ctx.store.has_session();
    ctx.store.clear_session();

    if had_session {
        output::print_success("Signed out");
    } else {
        output::print_warning("No admin session stored");
    }
    Ok(())
}
