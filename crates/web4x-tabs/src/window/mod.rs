//! The browser window controller.
//!
//! `BrowserWindow` ties the tab set to the bridge channel and the history
//! log. It never touches the platform directly: the backend feeds it
//! [`TabEvent`]s and [`WindowCommand`]s and calls [`BrowserWindow::pump`]
//! from the event loop, and reads [`ChromeState`] back to draw the toolbar
//! and window title.

mod chrome;
mod command;
mod pump;


use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::{info, warn};
use web4x_bridge::{BridgeChannel, CodeResultRelay, FileSystemCapability, CODE_EXECUTOR, FILE_SYSTEM_HANDLER};
use web4x_common::{BridgeError, ConfigError, EndpointId, TabId};
use web4x_config::{SettingsStore, Web4xConfig};

use crate::history::HistoryLog;
use crate::manager::TabManager;
use crate::session::{load_session, save_session};
use crate::surface::{ContentSurface, SurfaceFactory, Viewport};

pub use chrome::{ChromeState, TabSummary};
pub use command::{normalize_url, WindowCommand};

/// Title of tabs opened without a page title yet.
pub const NEW_TAB_TITLE: &str = "New Tab";
const HOME_TAB_TITLE: &str = "Home";
const RESTORED_TAB_TITLE: &str = "Restored Tab";

/// Window behavior taken from the config file.
#[derive(Debug, Clone)]
pub struct WindowOptions {
    pub default_url: String,
    pub app_title: String,
    pub restore_session: bool,
    pub history_capacity: usize,
    pub recent_count: usize,
    pub zoom_step: f64,
    pub zoom_min: f64,
    pub files_base: PathBuf,
    pub confine_files: bool,
    pub devtools: bool,
}

impl WindowOptions {
    pub fn from_config(config: &Web4xConfig) -> Self {
        Self {
            default_url: config.browser.default_url.clone(),
            app_title: config.browser.title.clone(),
            restore_session: config.browser.restore_session,
            history_capacity: config.history.max_entries,
            recent_count: config.history.recent_count,
            zoom_step: config.zoom.step,
            zoom_min: config.zoom.min,
            files_base: config.files.resolve_base_dir(),
            confine_files: config.files.confine_to_base,
            devtools: config.webview.devtools,
        }
    }
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self::from_config(&Web4xConfig::default())
    }
}

/// One browser window: tabs, bridge, history and zoom.
pub struct BrowserWindow<F: SurfaceFactory> {
    options: WindowOptions,
    bridge: Arc<BridgeChannel>,
    tabs: TabManager<F>,
    history: HistoryLog,
    zoom: f64,
    runtime: Handle,
    chrome_dirty: bool,
}

impl<F: SurfaceFactory> BrowserWindow<F> {
    /// A window with the built-in capabilities registered.
    pub fn new(factory: F, options: WindowOptions, runtime: Handle) -> Result<Self, BridgeError> {
        Self::with_channel(factory, options, BridgeChannel::new(), runtime)
    }

    /// A window on a caller-prepared channel. The built-in capabilities are
    /// added to it; a name clash fails construction.
    pub fn with_channel(
        factory: F,
        options: WindowOptions,
        mut bridge: BridgeChannel,
        runtime: Handle,
    ) -> Result<Self, BridgeError> {
        bridge.register(CODE_EXECUTOR, CodeResultRelay::new())?;
        bridge.register(
            FILE_SYSTEM_HANDLER,
            FileSystemCapability::new(&options.files_base).with_confinement(options.confine_files),
        )?;
        info!(
            capabilities = ?bridge.capability_names(),
            files_base = %options.files_base.display(),
            "bridge ready"
        );

        Ok(Self {
            history: HistoryLog::with_capacity(options.history_capacity),
            options,
            bridge: Arc::new(bridge),
            tabs: TabManager::new(factory),
            zoom: 1.0,
            runtime,
            chrome_dirty: true,
        })
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn options(&self) -> &WindowOptions {
        &self.options
    }

    pub fn tabs(&self) -> &TabManager<F> {
        &self.tabs
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn bridge(&self) -> &Arc<BridgeChannel> {
        &self.bridge
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Open the saved session (if enabled), then `extra_urls`. Falls back to
    /// a single home tab when nothing opened.
    pub fn startup(&mut self, store: &dyn SettingsStore, extra_urls: &[String]) {
        if self.options.restore_session {
            let saved = load_session(store);
            info!(tabs = saved.len(), "restoring session");
            for url in &saved {
                self.add_tab(url, RESTORED_TAB_TITLE);
            }
        }
        for url in extra_urls {
            if let Some(url) = normalize_url(url) {
                self.add_tab(&url, NEW_TAB_TITLE);
            }
        }
        if self.tabs.is_empty() {
            let home = self.options.default_url.clone();
            self.add_tab(&home, HOME_TAB_TITLE);
        }
    }

    /// Detach every endpoint and persist the open tabs. With session
    /// restore off the saved session is left untouched, so a one-off run
    /// does not replace it.
    pub fn shutdown(&mut self, store: &mut dyn SettingsStore) -> Result<(), ConfigError> {
        for tab in self.tabs.tabs() {
            self.bridge.detach(tab.endpoint());
        }
        if !self.options.restore_session {
            info!("session restore disabled, keeping saved session");
            return Ok(());
        }
        let urls = self.tabs.session_urls();
        info!(tabs = urls.len(), "saving session");
        save_session(store, &urls)
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.tabs.set_viewport(viewport);
    }

    // -------------------------------------------------------------------------
    // Tabs
    // -------------------------------------------------------------------------

    /// Open `url` in a new current tab and attach it to the bridge.
    pub fn add_tab(&mut self, url: &str, title: &str) -> Option<TabId> {
        match self.tabs.add_tab(url, title) {
            Ok(id) => Some(self.opened(id)),
            Err(e) => {
                warn!(url, error = %e, "failed to open tab");
                None
            }
        }
    }

    /// Duplicate the tab at `index` into a new current tab.
    pub fn clone_tab(&mut self, index: usize) -> Option<TabId> {
        match self.tabs.clone_tab(index) {
            Ok(id) => id.map(|id| self.opened(id)),
            Err(e) => {
                warn!(index, error = %e, "failed to clone tab");
                None
            }
        }
    }

    fn opened(&mut self, id: TabId) -> TabId {
        self.bridge.attach(EndpointId::from(id));
        self.apply_zoom();
        self.chrome_dirty = true;
        id
    }

    /// Close the tab at `index` and detach it from the bridge.
    pub fn close_tab(&mut self, index: usize) -> Option<TabId> {
        let id = self.tabs.close_tab(index)?;
        self.bridge.detach(EndpointId::from(id));
        self.apply_zoom();
        self.chrome_dirty = true;
        Some(id)
    }

    pub fn select_tab(&mut self, index: usize) -> bool {
        let changed = self.tabs.select_tab(index);
        if changed {
            self.apply_zoom();
            self.chrome_dirty = true;
        }
        changed
    }

    /// Open a local file as a `file://` tab.
    pub fn open_path(&mut self, path: &Path) -> Option<TabId> {
        let url = match url::Url::from_file_path(path) {
            Ok(url) => url,
            Err(()) => {
                warn!(path = %path.display(), "dropped path is not absolute, ignoring");
                return None;
            }
        };
        let title = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| NEW_TAB_TITLE.to_string());
        self.add_tab(url.as_str(), &title)
    }

    // -------------------------------------------------------------------------
    // Zoom
    // -------------------------------------------------------------------------

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + self.options.zoom_step);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom((self.zoom - self.options.zoom_step).max(self.options.zoom_min));
    }

    /// Zoom label as shown in the toolbar, e.g. `Zoom: 110%`.
    pub fn zoom_label(&self) -> String {
        format!("Zoom: {:.0}%", self.zoom * 100.0)
    }

    fn set_zoom(&mut self, factor: f64) {
        self.zoom = (factor * 100.0).round() / 100.0;
        self.apply_zoom();
        self.chrome_dirty = true;
    }

    fn apply_zoom(&self) {
        if let Some(tab) = self.tabs.current() {
            if let Err(e) = tab.surface().set_zoom(self.zoom) {
                warn!(tab_id = %tab.id(), error = %e, "failed to set zoom");
            }
        }
    }
}
