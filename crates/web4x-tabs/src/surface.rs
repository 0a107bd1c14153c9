//! The content-surface seam between tabs and the rendering backend.

use std::path::PathBuf;

use serde_json::Value;
use web4x_bridge::protocol::{js_deliver, HostMessage};
use web4x_common::{SurfaceError, TabId};

/// Position and size of the content area in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Why a script result was requested, so the answer can be routed when it
/// comes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptPurpose {
    /// `href` of the focused element, for "open link in new tab".
    FocusedLink,
}

/// A page host: one per tab.
///
/// Calls return immediately; whatever happens afterwards inside the page is
/// reported back as [`SurfaceEvent`]s tagged with the owning tab.
pub trait ContentSurface {
    /// Start loading `url`.
    fn load(&mut self, url: &str) -> Result<(), SurfaceError>;

    /// Replace the page with inline HTML.
    fn load_html(&mut self, html: &str) -> Result<(), SurfaceError>;

    /// Run `js` in the page, ignoring its value.
    fn run_script(&self, js: &str) -> Result<(), SurfaceError>;

    /// Run `js` and report its value as [`SurfaceEvent::ScriptResult`].
    fn run_script_with_result(&self, js: &str, purpose: ScriptPurpose) -> Result<(), SurfaceError>;

    fn can_go_back(&self) -> bool;
    fn can_go_forward(&self) -> bool;
    fn back(&mut self) -> Result<(), SurfaceError>;
    fn forward(&mut self) -> Result<(), SurfaceError>;
    fn reload(&mut self) -> Result<(), SurfaceError>;

    fn set_zoom(&self, factor: f64) -> Result<(), SurfaceError>;
    fn set_visible(&self, visible: bool) -> Result<(), SurfaceError>;
    fn set_viewport(&self, viewport: Viewport) -> Result<(), SurfaceError>;
    fn open_devtools(&self);

    /// Hand a bridge message to the page's client runtime.
    fn post(&self, message: &HostMessage) -> Result<(), SurfaceError> {
        self.run_script(&js_deliver(message))
    }
}

/// Creates surfaces for new tabs.
pub trait SurfaceFactory {
    type Surface: ContentSurface;

    /// A surface for `tab`, already loading `url`.
    fn create(&mut self, tab: TabId, url: &str) -> Result<Self::Surface, SurfaceError>;

    /// Area new and existing surfaces should occupy.
    fn set_viewport(&mut self, viewport: Viewport);
}

/// Something that happened inside a surface.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    TitleChanged(String),
    UrlChanged(String),
    LoadFinished { url: String, ok: bool },
    ScriptResult { purpose: ScriptPurpose, value: Value },
    /// Raw bridge message posted by page script.
    Ipc(String),
    /// Files dropped onto the page.
    FilesDropped(Vec<PathBuf>),
}

/// A surface event tagged with the tab that owns the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct TabEvent {
    pub tab: TabId,
    pub event: SurfaceEvent,
}

impl TabEvent {
    pub fn new(tab: TabId, event: SurfaceEvent) -> Self {
        Self { tab, event }
    }
}

// =============================================================================
// TEST SURFACES
// =============================================================================
