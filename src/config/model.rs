//! Config struct definition and default implementation.

use super::types::*;
use crate::logging::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a pdm repository.
///
/// This struct represents the contents of `pdm.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the checkout-able files.
    /// Relative paths resolve against the config file's directory.
    #[serde(default = "default_repo_path")]
    pub repo_path: PathBuf,

    /// Control file holding the lock table.
    /// Relative paths resolve against the config file's directory.
    #[serde(default = "default_locks_file")]
    pub locks_file: PathBuf,

    /// File extensions visible in the repository (no leading dots).
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,

    /// Log output format.
    #[serde(default)]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repo_path: default_repo_path(),
            locks_file: default_locks_file(),
            allowed_extensions: default_allowed_extensions(),
            log_format: LogFormat::default(),
        }
    }
}
