pub mod errors;
pub mod id;

pub use errors::{BridgeError, ConfigError, SurfaceError, Web4xError};
pub use id::{EndpointId, TabId};

pub type Result<T> = std::result::Result<T, Web4xError>;
