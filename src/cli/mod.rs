//! CLI argument parsing for pdm.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use pdm::config::DEFAULT_CONFIG_FILE;
use std::path::PathBuf;

/// pdm: check files in and out of a shared document repository.
///
/// A checked-out file is locked to one user until that user checks it back in.
/// Lock state lives in a single JSON control file shared by every pdm process
/// on the host.
#[derive(Parser, Debug)]
#[command(name = "pdm")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file. Defaults are used if it does not exist.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Override the repository directory from the config file.
    #[arg(long, global = true)]
    pub repo: Option<PathBuf>,

    /// Override the lock control file from the config file.
    #[arg(long, global = true)]
    pub locks_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Available commands for pdm.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List repository files and their checkout status.
    List(ListArgs),

    /// Show the status of a single file.
    Show(ShowArgs),

    /// Check out a file, locking it to you.
    ///
    /// Fails if the file is not in the repository or is already checked out.
    Checkout(CheckoutArgs),

    /// Check in a file you have checked out.
    ///
    /// Fails if the file is not checked out or is checked out by someone else.
    Checkin(CheckinArgs),

    /// Release a checkout regardless of who holds it.
    ///
    /// Requires --force flag to prevent accidental clearing.
    Unlock(UnlockArgs),
}

/// Arguments for the `list` command.
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `show` command.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// File to show (e.g., 4806148.mcam).
    pub filename: String,

    /// Print JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `checkout` command.
#[derive(Parser, Debug)]
pub struct CheckoutArgs {
    /// File to check out.
    pub filename: String,

    /// Why the file is being checked out (1-500 characters).
    #[arg(short, long)]
    pub message: String,

    /// User taking the checkout. Defaults to $USER.
    #[arg(short, long)]
    pub user: Option<String>,
}

/// Arguments for the `checkin` command.
#[derive(Parser, Debug)]
pub struct CheckinArgs {
    /// File to check in.
    pub filename: String,

    /// User returning the checkout. Defaults to $USER.
    #[arg(short, long)]
    pub user: Option<String>,
}

/// Arguments for the `unlock` command.
#[derive(Parser, Debug)]
pub struct UnlockArgs {
    /// File whose checkout should be cleared.
    pub filename: String,

    /// Force clearing the checkout (required for safety).
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_checkout_with_globals() {
        let cli = Cli::try_parse_from([
            "pdm",
            "checkout",
            "4806148.mcam",
            "-m",
            "edit gear",
            "--user",
            "mmclean",
            "--locks-file",
            "/tmp/locks.json",
        ])
        .unwrap();

        assert_eq!(cli.config, PathBuf::from("pdm.yaml"));
        assert_eq!(cli.locks_file, Some(PathBuf::from("/tmp/locks.json")));
        match cli.command {
            Command::Checkout(args) => {
                assert_eq!(args.filename, "4806148.mcam");
                assert_eq!(args.message, "edit gear");
                assert_eq!(args.user.as_deref(), Some("mmclean"));
            }
            other => panic!("expected checkout, got {other:?}"),
        }
    }

    #[test]
    fn checkout_requires_message() {
        assert!(Cli::try_parse_from(["pdm", "checkout", "a.mcam"]).is_err());
    }
}
