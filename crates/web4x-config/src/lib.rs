//! Web4x configuration system.
//!
//! Provides TOML-based configuration for the browser window plus the JSON
//! key/value settings store used for session persistence. All config
//! sections use defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use web4x_config::load_config;
//!
//! let config = load_config().expect("failed to load config");
//! println!("{}", config.browser.default_url);
//! ```

mod atomic_write;
pub mod schema;
pub mod settings;
pub mod toml_loader;
pub mod validation;

pub use schema::{Web4xConfig, CONFIG_SCHEMA_VERSION};
pub use settings::{JsonSettingsStore, MemorySettingsStore, SettingsStore};

use std::path::Path;

use web4x_common::ConfigError;

/// Load config from the platform default path, creating a default file if
/// none exists, and validate the result.
pub fn load_config() -> Result<Web4xConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load config from an explicit path (the `--config` override) and validate it.
pub fn load_config_from(path: &Path) -> Result<Web4xConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }
    let config = toml_loader::load_from_path(path)?;
    validation::validate(&config)?;
    Ok(config)
}
