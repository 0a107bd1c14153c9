//! Wire format between the client runtime and the host.
//!
//! Both directions are JSON objects tagged by `kind`:
//!
//! ```text
//! content -> host   {"kind":"discover","id":1}
//!                   {"kind":"invoke","id":2,"capability":"fileSystemHandler",
//!                    "method":"readFile","args":["notes.txt"]}
//! host -> content   {"kind":"capabilities","id":1,"capabilities":{...}}
//!                   {"kind":"reply","id":2,"result":{...}}
//!                   {"kind":"reply","id":2,"result":null,"error":"..."}
//!                   {"kind":"event","capability":"...","event":"...","payload":...}
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use web4x_common::BridgeError;

/// A request from page script to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClientMessage {
    /// List every registered capability and its methods.
    Discover { id: u64 },
    /// Call `method` on `capability`.
    Invoke {
        id: u64,
        capability: String,
        method: String,
        #[serde(default)]
        args: Vec<Value>,
    },
}

impl ClientMessage {
    /// Parse a message from the raw string handed to `window.ipc.postMessage`.
    pub fn from_json(raw: &str) -> Result<Self, BridgeError> {
        serde_json::from_str(raw).map_err(|e| BridgeError::Malformed(e.to_string()))
    }

    /// The request id the reply must carry.
    pub fn id(&self) -> u64 {
        match self {
            Self::Discover { id } | Self::Invoke { id, .. } => *id,
        }
    }
}

/// A named event emitted by a capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeEvent {
    /// Name of the capability that emitted it.
    pub capability: String,
    /// Event name, e.g. `fileRead` or `codeResult`.
    pub event: String,
    /// A string or a structured record.
    pub payload: Value,
}

impl BridgeEvent {
    pub fn new(capability: impl Into<String>, event: impl Into<String>, payload: Value) -> Self {
        Self {
            capability: capability.into(),
            event: event.into(),
            payload,
        }
    }

    /// Whether this is `event` from `capability`.
    pub fn is(&self, capability: &str, event: &str) -> bool {
        self.capability == capability && self.event == event
    }
}

/// A message from the host to page script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HostMessage {
    /// Answer to `discover`.
    Capabilities {
        id: u64,
        capabilities: BTreeMap<String, Vec<String>>,
    },
    /// Answer to `invoke`.
    Reply {
        id: u64,
        #[serde(default)]
        result: Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    /// A broadcast event.
    Event(BridgeEvent),
}

impl HostMessage {
    /// Build the reply to invocation `id`.
    pub fn reply(id: u64, outcome: Result<Value, BridgeError>) -> Self {
        match outcome {
            Ok(result) => Self::Reply {
                id,
                result,
                error: None,
            },
            Err(e) => Self::Reply {
                id,
                result: Value::Null,
                error: Some(e.to_string()),
            },
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "null".to_string())
    }
}

/// JS snippet that hands `message` to the client runtime of a surface.
///
/// Messages that arrive before the runtime is injected are dropped by the
/// guard rather than throwing inside the page.
pub fn js_deliver(message: &HostMessage) -> String {
    format!(
        "window.web4x && window.web4x.bridge && window.web4x.bridge._receive({});",
        message.to_json()
    )
}
