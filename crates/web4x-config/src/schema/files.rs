//! File-system capability configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where page scripts may create, read and delete files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    /// Base directory for relative paths. `None` means the platform default.
    pub base_dir: Option<PathBuf>,
    /// Reject paths that would resolve outside `base_dir`.
    pub confine_to_base: bool,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            base_dir: None,
            confine_to_base: true,
        }
    }
}

impl FilesConfig {
    /// The configured base directory, or the platform default.
    pub fn resolve_base_dir(&self) -> PathBuf {
        self.base_dir.clone().unwrap_or_else(default_base_dir)
    }
}

/// The user's home directory, or `~/Documents` on Windows.
pub fn default_base_dir() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    if cfg!(target_os = "windows") {
        home.join("Documents")
    } else {
        home
    }
}
