//! Window title management: reflects the current tab.

use super::core::Web4xApp;

impl Web4xApp {
    /// Set the window title, e.g. `Example Domain - Web4x Browser`.
    pub(super) fn update_window_title(&self, title: &str) {
        let Some(ref window) = self.window else {
            return;
        };
        window.set_title(title);
    }
}

// =============================================================================
// TESTS
// =============================================================================
