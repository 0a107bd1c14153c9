use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a tab. Allocated from a monotonic counter by the tab
/// manager and never reused within a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TabId(pub u64);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tab-{}", self.0)
    }
}

/// A content surface attached to the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EndpointId(pub u64);

impl fmt::Display for EndpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "endpoint-{}", self.0)
    }
}

/// Every tab is attached to the bridge under the endpoint with the same number.
impl From<TabId> for EndpointId {
    fn from(id: TabId) -> Self {
        Self(id.0)
    }
}

impl From<EndpointId> for TabId {
    fn from(id: EndpointId) -> Self {
        Self(id.0)
    }
}
