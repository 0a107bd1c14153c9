//! The capability seam: host objects callable from page script.

use async_trait::async_trait;
use serde_json::Value;
use web4x_common::BridgeError;

use crate::channel::EventEmitter;

/// A host-side object exposed to content through the bridge.
///
/// `invoke` answers the calling endpoint; anything the capability wants every
/// endpoint to see goes through `events.emit`. Implementations recover their
/// own I/O failures and report them as events, returning `Err` only for
/// protocol problems (unknown method, bad arguments).
#[async_trait]
pub trait Capability: Send + Sync {
    /// Names of the callable methods, as seen by page script.
    fn methods(&self) -> &'static [&'static str];

    /// Run `method` with positional `args`.
    async fn invoke(
        &self,
        method: &str,
        args: Vec<Value>,
        events: &EventEmitter,
    ) -> Result<Value, BridgeError>;
}

/// Positional string argument `index` of `method`.
pub fn string_arg<'a>(method: &str, args: &'a [Value], index: usize) -> Result<&'a str, BridgeError> {
    match args.get(index) {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(BridgeError::InvalidArguments {
            method: method.to_string(),
            reason: format!("argument {index} must be a string, got {other}"),
        }),
        None => Err(BridgeError::InvalidArguments {
            method: method.to_string(),
            reason: format!("missing argument {index}"),
        }),
    }
}
