use web4x_config::schema::WebViewSettings;

/// Engine settings shared by every tab surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceConfig {
    /// Whether the engine's developer tools can be opened.
    pub devtools: bool,
    pub user_agent: Option<String>,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            devtools: cfg!(debug_assertions),
            user_agent: None,
        }
    }
}

impl From<&WebViewSettings> for SurfaceConfig {
    fn from(settings: &WebViewSettings) -> Self {
        Self {
            devtools: settings.devtools,
            user_agent: settings.user_agent.clone(),
        }
    }
}
