//! Active admin module commands.

use clap::{Args, Subcommand};
use serde::Serialize;

use asgf_core::config::AppConfig;
use asgf_core::error::AppError;
use asgf_core::types::Location;

use crate::output::{self, FieldRow, OutputFormat};

/// Arguments for module commands
#[derive(Debug, Args)]
pub struct ModuleArgs {
    /// Module subcommand
    #[command(subcommand)]
    pub command: ModuleCommand,
}

/// Module subcommands
#[derive(Debug, Subcommand)]
pub enum ModuleCommand {
    /// Show the active module
    Get,
    /// Switch to another module
    Set {
        /// Module identifier, e.g. "members" or "calendar"
        name: String,
    },
}

#[derive(Debug, Serialize)]
struct ModuleInfo {
    active_module: String,
    permitted: Option<bool>,
}

/// Execute module commands
pub fn execute(args: &ModuleArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let (ctx, _) = super::session_context(config, Location::new(&config.routes.landing_path))?;

    match &args.command {
        ModuleCommand::Get => {
            let active_module = ctx.store.get_active_module();
            let permitted = ctx.store.get_admin().map(|a| a.permits(&active_module));

            let mut rows = vec![FieldRow::new("Active module", active_module.clone())];
            if let Some(permitted) = permitted {
                rows.push(FieldRow::new("Permitted", if permitted { "yes" } else { "no" }));
            }
            output::print_item(
                &ModuleInfo {
                    active_module,
                    permitted,
                },
                &rows,
                format,
            );
        }
        ModuleCommand::Set { name } => {
            let admin = ctx
                .store
                .get_admin()
                .ok_or_else(|| AppError::authentication("Not signed in"))?;
            if !admin.permits(name) {
                return Err(AppError::authentication(format!(
                    "{} may not open module '{}'",
                    admin.label(),
                    name
                )));
            }

            ctx.store.set_active_module(name)?;
            ctx.store.touch_activity();
            output::print_success(&format!("Active module set to '{}'", name));
        }
    }

    Ok(())
}
