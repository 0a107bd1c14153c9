//! Configuration schema types for Web4x.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod browser;
mod files;
mod history;
mod system;

pub use browser::*;
pub use files::*;
pub use history::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for Web4x.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Web4xConfig {
    pub browser: BrowserConfig,
    pub history: HistoryConfig,
    pub files: FilesConfig,
    pub zoom: ZoomConfig,
    pub webview: WebViewSettings,
    pub logging: LoggingConfig,
}
