//! `wry` backend for browser tabs and the toolbar.
//!
//! Every tab gets a child `wry::WebView` of the main window. Callbacks from
//! a webview (IPC, page load, title, drag and drop, script results) are
//! pushed into a shared [`EventSink`] tagged with the owning tab, and the
//! event loop drains them into the window controller.

mod bounds;
mod chrome;
mod events;
mod factory;
mod handlers;
mod nav_history;
mod surface;
mod types;

pub use bounds::{split_window, viewport_to_wry, CHROME_HEIGHT};
pub use chrome::{js_update_chrome, ChromeBar, CHROME_HTML};
pub use events::EventSink;
pub use factory::WrySurfaceFactory;
pub use handlers::{is_navigation_allowed, ALLOWED_NAV_SCHEMES};
pub use nav_history::NavHistory;
pub use surface::WrySurface;
pub use types::SurfaceConfig;
