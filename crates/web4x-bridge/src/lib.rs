//! Host/content message bridge.
//!
//! Page scripts reach named host capabilities through a `BridgeChannel`:
//! - **Content -> host**: the injected client runtime posts JSON
//!   `ClientMessage`s (`discover`, `invoke`) through `window.ipc.postMessage`.
//! - **Host -> content**: replies and emitted events are queued in the
//!   channel outbox and delivered to attached endpoints when the host
//!   flushes it, as `window.web4x.bridge._receive(...)` calls.
//!
//! Events are broadcast: every attached endpoint sees every event, which is
//! how one tab's script can ask the window to open another tab.

pub mod capability;
pub mod channel;
pub mod fs;
pub mod protocol;
pub mod relay;
pub mod scripts;

pub use capability::Capability;
pub use channel::{BridgeChannel, EventEmitter, Outgoing};
pub use fs::{FileSystemCapability, FsMethod, FILE_SYSTEM_HANDLER};
pub use protocol::{BridgeEvent, ClientMessage, HostMessage};
pub use relay::{CodeResultRelay, RelayMethod, CODE_EXECUTOR, CODE_RESULT_EVENT};
pub use scripts::{injection_script, BRIDGE_CLIENT_SCRIPT, HELPER_LIBRARY_SCRIPT};
