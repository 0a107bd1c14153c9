//! Window creation and browser setup.

use std::sync::Arc;

use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

use web4x_tabs::{BrowserWindow, SurfaceFactory, Viewport, WindowOptions};
use web4x_webview::{split_window, ChromeBar, SurfaceConfig, WrySurfaceFactory, CHROME_HEIGHT};

use super::core::Web4xApp;
use super::types::WINDOW_SIZE;

impl Web4xApp {
    /// Create the window, the toolbar and the browser, then open the first
    /// tabs. Returns `false` if initialization failed and the event loop
    /// should exit.
    pub(super) fn initialize_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let Some(runtime) = self.tokio_runtime.as_ref() else {
            tracing::error!("No tokio runtime, cannot start the bridge");
            return false;
        };

        let attrs = WindowAttributes::default()
            .with_title(self.config.browser.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(WINDOW_SIZE.0, WINDOW_SIZE.1));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                return false;
            }
        };

        let (chrome_rect, content_rect) = window_layout(&window);

        let toolbar = match ChromeBar::new(&*window, chrome_rect, self.config.webview.devtools) {
            Ok(toolbar) => toolbar,
            Err(e) => {
                tracing::error!("Failed to create toolbar: {e}");
                return false;
            }
        };

        let mut factory = WrySurfaceFactory::new(
            Arc::clone(&window),
            SurfaceConfig::from(&self.config.webview),
            self.events.clone(),
        );
        factory.set_viewport(content_rect);

        let options = WindowOptions::from_config(&self.config);
        let mut browser = match BrowserWindow::new(factory, options, runtime.handle().clone()) {
            Ok(browser) => browser,
            Err(e) => {
                tracing::error!("Failed to set up the bridge: {e}");
                return false;
            }
        };
        browser.startup(&*self.store, &self.launch_urls);

        tracing::info!(tabs = browser.tabs().len(), "Window created and browser started");
        self.toolbar = Some(toolbar);
        self.browser = Some(browser);
        self.window = Some(window);
        true
    }

    /// Re-split the window after a resize.
    pub(super) fn sync_layout(&mut self) {
        let Some(window) = self.window.as_ref() else {
            return;
        };
        let (chrome_rect, content_rect) = window_layout(window);
        if let Some(toolbar) = &self.toolbar {
            toolbar.set_viewport(chrome_rect);
        }
        if let Some(browser) = self.browser.as_mut() {
            browser.set_viewport(content_rect);
        }
    }
}

fn window_layout(window: &Window) -> (Viewport, Viewport) {
    let size = window.inner_size().to_logical::<f64>(window.scale_factor());
    split_window(size.width, size.height, CHROME_HEIGHT)
}
