//! Config loading, validation, and path resolution.

use super::model::Config;
use crate::error::{PdmError, Result};
use std::path::Path;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Relative paths in the file are resolved against the file's directory.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(PdmError::Config)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            PdmError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let mut config = Self::from_yaml(&content)?;
        if let Some(base_dir) = path.parent() {
            config.resolve_relative_to(base_dir);
        }
        Ok(config)
    }

    /// Load config from `path` if it exists, otherwise use defaults.
    ///
    /// Defaults keep their relative paths, which then resolve against the
    /// working directory.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from a YAML string.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| PdmError::Config(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| PdmError::Config(format!("failed to serialize config to YAML: {}", e)))
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `allowed_extensions` must not be empty
    /// - `allowed_extensions` entries must be non-empty and have no leading dots
    pub fn validate(&self) -> Result<()> {
        if self.allowed_extensions.is_empty() {
            return Err(PdmError::Config(
                "config validation failed: allowed_extensions must not be empty".to_string(),
            ));
        }

        for ext in &self.allowed_extensions {
            if ext.is_empty() {
                return Err(PdmError::Config(
                    "config validation failed: allowed_extensions entries must be non-empty"
                        .to_string(),
                ));
            }
            if ext.starts_with('.') {
                return Err(PdmError::Config(format!(
                    "config validation failed: allowed_extensions entries must not have leading dots (found '{}'). Use '{}' instead.",
                    ext,
                    ext.trim_start_matches('.')
                )));
            }
        }

        Ok(())
    }

    /// Make relative `repo_path` and `locks_file` relative to `base_dir`.
    pub fn resolve_relative_to(&mut self, base_dir: &Path) {
        if self.repo_path.is_relative() {
            self.repo_path = base_dir.join(&self.repo_path);
        }
        if self.locks_file.is_relative() {
            self.locks_file = base_dir.join(&self.locks_file);
        }
    }
}
