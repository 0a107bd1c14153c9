//! Window-level browser behavior.

use serde::{Deserialize, Serialize};

/// Browser window configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// URL opened for a new tab and when no session is restored.
    pub default_url: String,
    /// Window title shown when no tab has reported a title yet.
    pub title: String,
    /// Reopen the tabs that were open when the window was last closed.
    pub restore_session: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            default_url: "https://google.com".into(),
            title: "Web4x Browser".into(),
            restore_session: true,
        }
    }
}

/// Zoom stepping for the current tab.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// Amount added or removed per zoom step (valid range: 0.01-1.0).
    pub step: f64,
    /// Smallest allowed zoom factor (valid range: 0.05-1.0).
    pub min: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            step: 0.1,
            min: 0.1,
        }
    }
}
