//! Command implementations for pdm.
//!
//! This module provides the dispatcher that loads configuration, wires up the
//! service, and routes CLI commands to their implementations.

mod checkout;
mod list;
mod show;

use crate::cli::{Cli, Command};
use pdm::config::Config;
use pdm::error::{PdmError, Result};
use pdm::logging::init_logging;
use pdm::repository::FileRepository;
use pdm::service::PdmService;
use pdm::store::LockStore;

/// Dispatch a command to its implementation.
///
/// This is the main entry point for command execution.
pub fn dispatch(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    init_logging(config.log_format);

    let service = build_service(&config)?;

    match cli.command {
        Command::List(args) => list::cmd_list(&service, args),
        Command::Show(args) => show::cmd_show(&service, args),
        Command::Checkout(args) => checkout::cmd_checkout(&service, args),
        Command::Checkin(args) => checkout::cmd_checkin(&service, args),
        Command::Unlock(args) => checkout::cmd_unlock(&service, args),
    }
}

/// Load the config file and apply command-line overrides.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load_or_default(&cli.config)?;

    if let Some(repo) = &cli.repo {
        config.repo_path = repo.clone();
    }
    if let Some(locks_file) = &cli.locks_file {
        config.locks_file = locks_file.clone();
    }

    Ok(config)
}

/// Construct the service for a config.
pub fn build_service(config: &Config) -> Result<PdmService> {
    let store = LockStore::open(&config.locks_file)?;
    let repository = FileRepository::open(&config.repo_path, &config.allowed_extensions)?;
    Ok(PdmService::new(store, repository))
}

/// Pick the acting user: the explicit one, else `$USER` / `$USERNAME`.
fn resolve_user(explicit: Option<String>) -> Result<String> {
    resolve_user_with(explicit, |key| std::env::var(key).ok())
}

fn resolve_user_with(
    explicit: Option<String>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<String> {
    explicit
        .or_else(|| lookup("USER"))
        .or_else(|| lookup("USERNAME"))
        .filter(|user| !user.trim().is_empty())
        .ok_or_else(|| {
            PdmError::InvalidRequest(
                "no user given; pass --user or set the USER environment variable".to_string(),
            )
        })
}
