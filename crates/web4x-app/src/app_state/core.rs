//! Web4xApp struct definition and constructor.

use std::sync::Arc;
use std::time::Instant;

use tokio::runtime::Runtime;
use winit::window::Window;

use web4x_config::schema::Web4xConfig;
use web4x_config::SettingsStore;
use web4x_webview::{ChromeBar, EventSink};

use super::types::Browser;

/// Top-level application state.
pub struct Web4xApp {
    pub(super) config: Web4xConfig,
    /// URLs from the command line, opened after the restored session.
    pub(super) launch_urls: Vec<String>,
    pub(super) store: Box<dyn SettingsStore>,

    // Windowing
    pub(super) window: Option<Arc<Window>>,
    pub(super) toolbar: Option<ChromeBar>,
    pub(super) browser: Option<Browser>,

    // Webview callbacks land here until the next poll
    pub(super) events: EventSink,

    // Bridge capabilities run on this runtime
    pub(super) tokio_runtime: Option<Runtime>,

    pub(super) modifiers: winit::keyboard::ModifiersState,
    pub(super) should_exit: bool,
    pub(super) last_poll: Instant,
}

impl Web4xApp {
    pub fn new(config: Web4xConfig, launch_urls: Vec<String>, store: Box<dyn SettingsStore>) -> Self {
        Self {
            config,
            launch_urls,
            store,
            window: None,
            toolbar: None,
            browser: None,
            events: EventSink::new(),
            tokio_runtime: build_runtime(),
            modifiers: winit::keyboard::ModifiersState::empty(),
            should_exit: false,
            last_poll: Instant::now(),
        }
    }
}

fn build_runtime() -> Option<Runtime> {
    match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("web4x-bridge")
        .enable_all()
        .build()
    {
        Ok(runtime) => Some(runtime),
        Err(e) => {
            tracing::error!("Failed to start tokio runtime: {e}");
            None
        }
    }
}
