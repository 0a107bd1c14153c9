//! Webview engine and logging configuration.

use serde::{Deserialize, Serialize};

/// Options handed to every content surface at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebViewSettings {
    /// Enable the engine's developer tools.
    pub devtools: bool,
    /// Custom user agent string.
    pub user_agent: Option<String>,
}

impl Default for WebViewSettings {
    fn default() -> Self {
        Self {
            devtools: true,
            user_agent: None,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "web4x=info".into(),
        }
    }
}
