use std::sync::{Arc, Mutex};

use tracing::debug;
use web4x_common::{SurfaceError, TabId};
use web4x_tabs::{SurfaceFactory, Viewport};
use wry::raw_window_handle::HasWindowHandle;
use wry::WebViewBuilder;

use crate::bounds::viewport_to_wry;
use crate::events::EventSink;
use crate::handlers::{
    attach_drag_drop_handler, attach_ipc_handler, attach_navigation_handler,
    attach_page_load_handler, attach_title_handler,
};
use crate::nav_history::NavHistory;
use crate::surface::WrySurface;
use crate::types::SurfaceConfig;

/// Builds one child webview per tab inside the main window.
pub struct WrySurfaceFactory<W> {
    window: Arc<W>,
    config: SurfaceConfig,
    viewport: Viewport,
    events: EventSink,
}

impl<W: HasWindowHandle> WrySurfaceFactory<W> {
    pub fn new(window: Arc<W>, config: SurfaceConfig, events: EventSink) -> Self {
        Self {
            window,
            config,
            viewport: Viewport::default(),
            events,
        }
    }

    /// The sink every surface from this factory reports into.
    pub fn events(&self) -> &EventSink {
        &self.events
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}

impl<W: HasWindowHandle> SurfaceFactory for WrySurfaceFactory<W> {
    type Surface = WrySurface;

    fn create(&mut self, tab: TabId, url: &str) -> Result<WrySurface, SurfaceError> {
        let nav = Arc::new(Mutex::new(NavHistory::new()));

        let mut builder = WebViewBuilder::new()
            .with_bounds(viewport_to_wry(self.viewport))
            .with_devtools(self.config.devtools)
            .with_focused(true)
            .with_url(url);

        if let Some(ua) = &self.config.user_agent {
            builder = builder.with_user_agent(ua);
        }

        builder = attach_ipc_handler(builder, self.events.clone(), tab);
        builder = attach_page_load_handler(builder, self.events.clone(), Arc::clone(&nav), tab);
        builder = attach_title_handler(builder, self.events.clone(), tab);
        builder = attach_navigation_handler(builder, tab);
        builder = attach_drag_drop_handler(builder, self.events.clone(), tab);

        let webview = builder
            .build_as_child(&*self.window)
            .map_err(|e| SurfaceError::Create(e.to_string()))?;

        debug!(tab_id = %tab, url, "webview created");

        Ok(WrySurface {
            webview,
            tab,
            nav,
            events: self.events.clone(),
        })
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }
}
