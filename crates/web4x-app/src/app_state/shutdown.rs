//! Graceful shutdown: save the session, destroy webviews, stop the runtime.

use std::time::Duration;

use super::core::Web4xApp;

// =============================================================================
// SHUTDOWN
// =============================================================================

impl Web4xApp {
    /// Perform graceful shutdown of all subsystems.
    ///
    /// Order matters:
    /// 1. Save the open tabs and detach them from the bridge
    /// 2. Destroy the tab webviews and the toolbar
    /// 3. Shut down the tokio runtime (cancels in-flight capability calls)
    pub(super) fn shutdown(&mut self) {
        tracing::info!("Initiating graceful shutdown");

        // 1-2. Session first, while the tabs still exist
        if let Some(mut browser) = self.browser.take() {
            if let Err(e) = browser.shutdown(&mut *self.store) {
                tracing::warn!("Failed to save session: {e}");
            }
        }
        self.toolbar = None;

        // 3. Runtime last, after nothing can schedule on it
        if let Some(rt) = self.tokio_runtime.take() {
            rt.shutdown_timeout(Duration::from_secs(2));
        }

        self.should_exit = true;
        tracing::info!("Graceful shutdown complete");
    }
}

// =============================================================================
// TESTS
// =============================================================================
