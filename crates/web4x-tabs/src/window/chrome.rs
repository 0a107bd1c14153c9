//! Snapshot of everything the toolbar and window title display.

use serde::Serialize;

use crate::surface::{ContentSurface, SurfaceFactory};

use super::BrowserWindow;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabSummary {
    pub title: String,
    pub url: String,
    pub loaded: bool,
}

/// What the window chrome shows right now.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChromeState {
    pub tabs: Vec<TabSummary>,
    pub current: Option<usize>,
    /// URL-bar text: the current tab's URL, empty without a tab.
    pub url: String,
    pub window_title: String,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub zoom_label: String,
    /// Most recently closed URLs, oldest first.
    pub recently_closed: Vec<String>,
    /// Most recent history URLs, newest first.
    pub recent_history: Vec<String>,
}

impl<F: SurfaceFactory> BrowserWindow<F> {
    /// Current chrome state.
    pub fn chrome(&self) -> ChromeState {
        let current = self.tabs.current();
        let window_title = match current {
            Some(tab) if !tab.title().is_empty() => {
                format!("{} - {}", tab.title(), self.options.app_title)
            }
            _ => self.options.app_title.clone(),
        };

        ChromeState {
            tabs: self
                .tabs
                .tabs()
                .iter()
                .map(|t| TabSummary {
                    title: t.title().to_string(),
                    url: t.url().to_string(),
                    loaded: t.is_loaded(),
                })
                .collect(),
            current: self.tabs.current_index(),
            url: current.map(|t| t.url().to_string()).unwrap_or_default(),
            window_title,
            can_go_back: current.is_some_and(|t| t.surface().can_go_back()),
            can_go_forward: current.is_some_and(|t| t.surface().can_go_forward()),
            zoom_label: self.zoom_label(),
            recently_closed: self
                .tabs
                .recently_closed_tail(self.options.recent_count)
                .to_vec(),
            recent_history: self
                .history
                .recent_entries(self.options.recent_count)
                .into_iter()
                .map(|e| e.url.clone())
                .collect(),
        }
    }

    /// The chrome state if anything changed since the last call.
    pub fn take_chrome_update(&mut self) -> Option<ChromeState> {
        if !self.chrome_dirty {
            return None;
        }
        self.chrome_dirty = false;
        Some(self.chrome())
    }
}
