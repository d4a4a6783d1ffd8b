//! Garden configuration.
//!
//! Loads `garden.toml` from the garden root. The file is optional; when
//! absent every field takes its default. All options:
//!
//! ```toml
//! # How many directory levels to descend. 0 plants only the root page.
//! max_depth = 3
//!
//! # Ignore files, both read from the garden root. Patterns are globs, one
//! # per line, `#` comments allowed. The repo file is shared with version
//! # control; the garden file is this tool's own and defaults to ignoring
//! # nothing beyond `.git`.
//! repo_ignore_file = ".gitignore"
//! garden_ignore_file = ".gardenignore"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Settings loaded from `garden.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GardenConfig {
    /// Recursion depth limit. The root is depth 0; its children are planted
    /// while `max_depth` is still positive.
    pub max_depth: i64,
    /// Name of the version-control ignore file read from the garden root.
    pub repo_ignore_file: String,
    /// Name of this tool's own ignore file read from the garden root.
    pub garden_ignore_file: String,
}

impl Default for GardenConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            repo_ignore_file: ".gitignore".to_string(),
            garden_ignore_file: ".gardenignore".to_string(),
        }
    }
}

impl GardenConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0..=128).contains(&self.max_depth) {
            return Err(ConfigError::Validation(
                "max_depth must be 0-128".into(),
            ));
        }
        if self.repo_ignore_file.is_empty() {
            return Err(ConfigError::Validation(
                "repo_ignore_file must not be empty".into(),
            ));
        }
        if self.garden_ignore_file.is_empty() {
            return Err(ConfigError::Validation(
                "garden_ignore_file must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Load `garden.toml` from the given directory, falling back to defaults
/// when the file does not exist.
pub fn load_config(root: &Path) -> Result<GardenConfig, ConfigError> {
    let config_path = root.join("garden.toml");
    if !config_path.exists() {
        return Ok(GardenConfig::default());
    }
    let content = fs::read_to_string(&config_path)?;
    let config: GardenConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

// ============================================================================
// Tests
// ============================================================================
