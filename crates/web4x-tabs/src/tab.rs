//! A single browser tab and how it reacts to its surface's events.

use std::path::PathBuf;

use serde_json::Value;
use tracing::{debug, warn};
use web4x_bridge::injection_script;
use web4x_common::{EndpointId, TabId};

use crate::surface::{ContentSurface, ScriptPurpose, SurfaceEvent};

/// What the window needs to hear about after a tab handled an event.
#[derive(Debug, Clone, PartialEq)]
pub enum TabNotice {
    TitleChanged(String),
    UrlChanged(String),
    /// Page loaded and the bridge scripts were injected.
    Loaded(String),
    LoadFailed(String),
    ScriptResult { purpose: ScriptPurpose, value: Value },
    Ipc(String),
    FilesDropped(Vec<PathBuf>),
}

/// One tab: identity, display state and its surface.
#[derive(Debug)]
pub struct Tab<S> {
    id: TabId,
    title: String,
    url: String,
    loaded: bool,
    /// False for generated pages (the history view), which are not saved
    /// with the session.
    persistent: bool,
    surface: S,
}

impl<S: ContentSurface> Tab<S> {
    pub fn new(id: TabId, url: impl Into<String>, title: impl Into<String>, surface: S) -> Self {
        Self {
            id,
            title: title.into(),
            url: url.into(),
            loaded: false,
            persistent: true,
            surface,
        }
    }

    pub fn id(&self) -> TabId {
        self.id
    }

    /// Bridge endpoint of this tab's page.
    pub fn endpoint(&self) -> EndpointId {
        EndpointId::from(self.id)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Whether the tab's URL belongs in the saved session.
    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Point the tab at `url`.
    pub fn navigate(&mut self, url: &str) {
        self.loaded = false;
        match self.surface.load(url) {
            Ok(()) => {
                self.url = url.to_string();
                self.persistent = true;
            }
            Err(e) => warn!(tab_id = %self.id, url, error = %e, "navigation failed"),
        }
    }

    /// Show inline HTML under a fixed title, e.g. the history page. The tab
    /// stays out of the saved session until it navigates to a URL.
    pub fn show_html(&mut self, title: &str, html: &str) {
        self.loaded = false;
        self.persistent = false;
        self.title = title.to_string();
        if let Err(e) = self.surface.load_html(html) {
            warn!(tab_id = %self.id, error = %e, "failed to load inline page");
        }
    }

    pub fn back(&mut self) {
        if self.surface.can_go_back() {
            if let Err(e) = self.surface.back() {
                warn!(tab_id = %self.id, error = %e, "back failed");
            }
        }
    }

    pub fn forward(&mut self) {
        if self.surface.can_go_forward() {
            if let Err(e) = self.surface.forward() {
                warn!(tab_id = %self.id, error = %e, "forward failed");
            }
        }
    }

    pub fn reload(&mut self) {
        if let Err(e) = self.surface.reload() {
            warn!(tab_id = %self.id, error = %e, "reload failed");
        }
    }

    /// Apply a surface event and report what the window should act on.
    pub fn handle(&mut self, event: SurfaceEvent) -> Option<TabNotice> {
        match event {
            SurfaceEvent::TitleChanged(title) => {
                if title.is_empty() || title == self.title {
                    return None;
                }
                self.title = title.clone();
                Some(TabNotice::TitleChanged(title))
            }
            SurfaceEvent::UrlChanged(url) => {
                if url == self.url {
                    return None;
                }
                self.url = url.clone();
                Some(TabNotice::UrlChanged(url))
            }
            SurfaceEvent::LoadFinished { url, ok } => {
                if !url.is_empty() {
                    self.url = url.clone();
                }
                if !ok {
                    self.loaded = false;
                    warn!(tab_id = %self.id, url = %url, "failed to load page");
                    return Some(TabNotice::LoadFailed(url));
                }
                self.loaded = true;
                self.inject_scripts();
                Some(TabNotice::Loaded(url))
            }
            SurfaceEvent::ScriptResult { purpose, value } => {
                Some(TabNotice::ScriptResult { purpose, value })
            }
            SurfaceEvent::Ipc(body) => Some(TabNotice::Ipc(body)),
            SurfaceEvent::FilesDropped(paths) if paths.is_empty() => None,
            SurfaceEvent::FilesDropped(paths) => Some(TabNotice::FilesDropped(paths)),
        }
    }

    fn inject_scripts(&self) {
        match self.surface.run_script(&injection_script()) {
            Ok(()) => debug!(tab_id = %self.id, "bridge scripts injected"),
            Err(e) => warn!(tab_id = %self.id, error = %e, "bridge script injection failed"),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
