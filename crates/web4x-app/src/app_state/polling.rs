//! Polling of webview events, toolbar commands and bridge traffic.

use std::time::Instant;

use winit::event_loop::ActiveEventLoop;

use super::core::Web4xApp;
use super::types::POLL_INTERVAL;

impl Web4xApp {
    /// Run polling and schedule the next wake-up.
    pub(super) fn poll_and_schedule(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();

        if now.duration_since(self.last_poll) >= POLL_INTERVAL {
            self.last_poll = now;
            self.poll_browser();
        }

        event_loop.set_control_flow(winit::event_loop::ControlFlow::WaitUntil(
            Instant::now() + POLL_INTERVAL,
        ));
    }

    /// Apply toolbar commands, feed webview events to the browser and push
    /// chrome changes back out.
    fn poll_browser(&mut self) {
        let Some(browser) = self.browser.as_mut() else {
            return;
        };

        if let Some(toolbar) = &self.toolbar {
            for command in toolbar.drain_commands() {
                browser.apply(command);
            }
        }

        browser.pump(self.events.drain());

        // A freshly loaded toolbar page is blank and needs the full state.
        let toolbar_reloaded = self.toolbar.as_ref().is_some_and(|t| t.take_loaded());
        let state = if toolbar_reloaded {
            Some(browser.chrome())
        } else {
            browser.take_chrome_update()
        };

        if let Some(state) = state {
            if let Some(toolbar) = &self.toolbar {
                toolbar.update(&state);
            }
            self.update_window_title(&state.window_title);
        }
    }
}
