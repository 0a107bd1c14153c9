//! Event-loop side of the window: surface events in, bridge traffic out.

use std::sync::Arc;

use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use web4x_bridge::{CODE_EXECUTOR, CODE_RESULT_EVENT};
use web4x_common::{EndpointId, TabId};

use crate::surface::{ContentSurface, ScriptPurpose, SurfaceFactory, TabEvent};
use crate::tab::TabNotice;

use super::{BrowserWindow, NEW_TAB_TITLE};

impl<F: SurfaceFactory> BrowserWindow<F> {
    /// Apply queued surface events, then deliver everything the bridge has
    /// queued. Called from the event loop on every poll.
    pub fn pump(&mut self, events: Vec<TabEvent>) {
        for event in events {
            if let Some((tab, notice)) = self.tabs.handle_surface_event(event) {
                self.on_notice(tab, notice);
            }
        }
        self.flush_bridge();
    }

    /// Hand a raw bridge message from `tab`'s page to the channel.
    pub fn handle_ipc(&self, tab: TabId, body: &str) -> Option<JoinHandle<()>> {
        self.bridge
            .handle_message(EndpointId::from(tab), body, &self.runtime)
    }

    fn on_notice(&mut self, tab: TabId, notice: TabNotice) {
        let is_current = self.tabs.current().is_some_and(|t| t.id() == tab);
        match notice {
            TabNotice::TitleChanged(_) | TabNotice::UrlChanged(_) | TabNotice::LoadFailed(_) => {
                self.chrome_dirty |= is_current;
            }
            TabNotice::Loaded(url) => {
                if !url.is_empty() && url != "about:blank" {
                    self.history.record(url);
                }
                self.chrome_dirty = true;
            }
            TabNotice::ScriptResult {
                purpose: ScriptPurpose::FocusedLink,
                value,
            } => match value {
                Value::String(url) if !url.is_empty() => {
                    self.add_tab(&url, NEW_TAB_TITLE);
                }
                _ => debug!(tab_id = %tab, "focused element has no link"),
            },
            TabNotice::Ipc(body) => {
                // The reply is queued on the channel; nothing waits on the task.
                let _ = self.handle_ipc(tab, &body);
            }
            TabNotice::FilesDropped(paths) => {
                for path in paths {
                    self.open_path(&path);
                }
            }
        }
    }

    fn flush_bridge(&mut self) {
        let bridge = Arc::clone(&self.bridge);
        let tabs = &self.tabs;
        let events = bridge.flush(|endpoint, message| {
            let id = TabId::from(endpoint);
            match tabs.get(id) {
                Some(tab) => {
                    if let Err(e) = tab.surface().post(message) {
                        warn!(tab_id = %id, error = %e, "bridge delivery failed");
                    }
                }
                None => debug!(tab_id = %id, "bridge message for closed tab discarded"),
            }
        });

        for event in events {
            if event.is(CODE_EXECUTOR, CODE_RESULT_EVENT) {
                self.open_code_result(event.payload);
            }
        }
    }

    /// A `codeResult` carrying a string opens it in a new tab.
    fn open_code_result(&mut self, payload: Value) {
        match payload {
            Value::String(url) if !url.is_empty() => {
                self.add_tab(&url, NEW_TAB_TITLE);
            }
            other => warn!(value = %other, "code result is not a URL, ignoring"),
        }
    }
}
