//! Core TOML config loading: read from path or platform default.

use std::path::Path;

use tracing::{info, warn};
use web4x_common::ConfigError;

use crate::schema::Web4xConfig;
use crate::validation;

use super::paths::{create_default_config, default_config_path};

/// Load config from a specific TOML file path.
///
/// Missing fields take their serde defaults. Validation problems are logged
/// and the parsed config is returned as-is; callers that need a hard failure
/// run `validation::validate` themselves.
pub fn load_from_path(path: &Path) -> Result<Web4xConfig, ConfigError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: Web4xConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e}");
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// On Linux: `~/.config/web4x/config.toml`
/// On macOS: `~/Library/Application Support/web4x/config.toml`
///
/// If the file does not exist, creates a default config file and returns defaults.
pub fn load_default() -> Result<Web4xConfig, ConfigError> {
    let path = default_config_path()?;

    if !path.exists() {
        info!("no config found at {}, creating default", path.display());
        create_default_config(&path)?;
        return Ok(Web4xConfig::default());
    }

    load_from_path(&path)
}
