//! CLI command definitions and dispatch.

pub mod login;
pub mod logout;
pub mod module;
pub mod status;
pub mod watch;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use asgf_core::config::AppConfig;
use asgf_core::error::AppError;
use asgf_core::types::Location;
use asgf_session::{MemoryHistory, SessionContext};

use crate::output::OutputFormat;

/// ASGF admin back-office session tool
#[derive(Debug, Parser)]
#[command(name = "asgf-admin", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding default.toml and environment overlays
    #[arg(short, long, default_value = "config")]
    pub config_dir: String,

    /// Configuration environment (defaults to $ASGF_ENV, then "development")
    #[arg(short, long)]
    pub env: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in against the authentication API
    Login(login::LoginArgs),
    /// Show the stored admin session
    Status,
    /// Clear the stored admin session
    Logout,
    /// Read or change the active admin module
    Module(module::ModuleArgs),
    /// Guard a protected area and track activity from stdin
    Watch(watch::WatchArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Login(args) => login::execute(args, &config).await,
            Commands::Status => status::execute(&config, self.format),
            Commands::Logout => logout::execute(&config),
            Commands::Module(args) => module::execute(args, &config, self.format),
            Commands::Watch(args) => watch::execute(args, &config).await,
        }
    }
}

/// Helper: build the session context with an in-process history starting at `start`
pub fn session_context(
    config: &AppConfig,
    start: Location,
) -> Result<(SessionContext, Arc<MemoryHistory>), AppError> {
    let history = Arc::new(MemoryHistory::new(start));
    let ctx = SessionContext::from_config(config, history.clone())?;
    Ok((ctx, history))
}
