//! Code-result relay: lets page script hand a value to every endpoint and to
//! the window, e.g. a URL the window should open in a new tab.

use std::str::FromStr;

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;
use web4x_common::BridgeError;

use crate::capability::Capability;
use crate::channel::EventEmitter;

/// Name the relay is registered under.
pub const CODE_EXECUTOR: &str = "codeExecutor";

/// Event carrying the relayed value.
pub const CODE_RESULT_EVENT: &str = "codeResult";

const METHODS: &[&str] = &["executeSignal"];

/// Methods of the relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayMethod {
    ExecuteSignal,
}

impl FromStr for RelayMethod {
    type Err = ();

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "executeSignal" => Ok(Self::ExecuteSignal),
            _ => Err(()),
        }
    }
}

/// Re-emits whatever it receives as a `codeResult` event.
#[derive(Debug, Default)]
pub struct CodeResultRelay;

impl CodeResultRelay {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Capability for CodeResultRelay {
    fn methods(&self) -> &'static [&'static str] {
        METHODS
    }

    async fn invoke(
        &self,
        method: &str,
        args: Vec<Value>,
        events: &EventEmitter,
    ) -> Result<Value, BridgeError> {
        let op = RelayMethod::from_str(method).map_err(|_| BridgeError::UnknownMethod {
            capability: CODE_EXECUTOR.to_string(),
            method: method.to_string(),
        })?;

        match op {
            RelayMethod::ExecuteSignal => {
                let value = args.into_iter().next().unwrap_or(Value::Null);
                info!(%value, "code result received");
                events.emit(CODE_RESULT_EVENT, value);
                Ok(Value::Null)
            }
        }
    }
}
