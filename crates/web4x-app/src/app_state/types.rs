use std::time::Duration;

use web4x_tabs::BrowserWindow;
use web4x_webview::WrySurfaceFactory;
use winit::window::Window;

/// How often webview events, toolbar commands and bridge traffic are polled.
pub(super) const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// Initial window size in logical pixels.
pub(super) const WINDOW_SIZE: (f64, f64) = (1024.0, 768.0);

/// The browser controller over `wry` tabs.
pub(super) type Browser = BrowserWindow<WrySurfaceFactory<Window>>;
