//! Configuration constants and defaults for pdm.

use std::path::PathBuf;

/// Config file looked up when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "pdm.yaml";

// Default value functions for serde
pub(crate) fn default_repo_path() -> PathBuf {
    PathBuf::from("repo")
}
pub(crate) fn default_locks_file() -> PathBuf {
    PathBuf::from("locks.json")
}
pub(crate) fn default_allowed_extensions() -> Vec<String> {
    vec!["mcam".to_string()]
}
