use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),

    #[error("settings store error: {0}")]
    SettingsError(String),
}

/// Failures of the host/content bridge itself. I/O failures inside a
/// capability never show up here; they are emitted as events instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BridgeError {
    #[error("capability already registered: {0}")]
    DuplicateCapability(String),

    #[error("unknown capability: {0}")]
    UnknownCapability(String),

    #[error("unknown method {method} on capability {capability}")]
    UnknownMethod { capability: String, method: String },

    #[error("invalid arguments for {method}: {reason}")]
    InvalidArguments { method: String, reason: String },

    #[error("malformed bridge message: {0}")]
    Malformed(String),
}

/// Failures reported by a content surface (the rendering engine).
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("failed to create content surface: {0}")]
    Create(String),

    #[error("script evaluation failed: {0}")]
    Script(String),

    #[error("navigation failed: {0}")]
    Navigation(String),

    #[error("content surface error: {0}")]
    Other(String),
}

#[derive(Debug, thiserror::Error)]
pub enum Web4xError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}
