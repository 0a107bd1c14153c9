//! Tabs, browsing history and the window controller.
//!
//! Everything here is independent of the rendering backend: tabs own a
//! [`ContentSurface`] produced by a [`SurfaceFactory`], and the backend
//! reports what happens inside a surface as [`TabEvent`]s that the
//! [`BrowserWindow`] applies on the event-loop thread.

pub mod history;
pub mod manager;
pub mod session;
pub mod surface;
pub mod tab;
pub mod window;

pub use history::{HistoryEntry, HistoryGroup, HistoryLog, MAX_HISTORY_LENGTH};
pub use manager::TabManager;
pub use session::{load_session, save_session, SESSION_KEY};
pub use surface::{ContentSurface, ScriptPurpose, SurfaceEvent, SurfaceFactory, TabEvent, Viewport};
pub use tab::{Tab, TabNotice};
pub use window::{BrowserWindow, ChromeState, TabSummary, WindowCommand, WindowOptions};
