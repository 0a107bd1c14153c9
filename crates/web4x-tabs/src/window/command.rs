//! User-facing window actions, shared by the toolbar and keyboard shortcuts.
//!
//! The toolbar posts commands as JSON tagged by `kind`:
//! `{"kind":"navigate","text":"example.com"}`, `{"kind":"close_tab","index":2}`.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::history::render_history_page;
use crate::surface::{ContentSurface, ScriptPurpose, SurfaceFactory};

use super::{BrowserWindow, NEW_TAB_TITLE};

/// Returns the `href` of the focused element, or `null`.
pub(super) const FOCUSED_LINK_SCRIPT: &str = r#"
(function() {
    var element = document.activeElement;
    return element && element.href ? String(element.href) : null;
})()
"#;

const HISTORY_TAB_TITLE: &str = "History";

/// Something the user asked the window to do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WindowCommand {
    /// Load the URL-bar text in the current tab.
    Navigate { text: String },
    Back,
    Forward,
    Reload,
    NewTab,
    CloseTab { index: usize },
    CloseCurrentTab,
    SelectTab { index: usize },
    NextTab,
    PreviousTab,
    MoveTab { from: usize, to: usize },
    CloneTab { index: usize },
    ZoomIn,
    ZoomOut,
    /// Reopen an entry of the recently-closed view.
    ReopenClosed { index: usize },
    /// Open an entry of the recent-history view.
    OpenRecent { index: usize },
    ShowHistory,
    OpenLinkInNewTab,
    DevTools,
}

impl WindowCommand {
    /// Parse a toolbar message. Unknown or malformed commands are logged
    /// and dropped.
    pub fn from_json(raw: &str) -> Option<Self> {
        match serde_json::from_str(raw) {
            Ok(command) => Some(command),
            Err(e) => {
                warn!(body_len = raw.len(), error = %e, "window command rejected");
                None
            }
        }
    }
}

/// URL-bar text as a loadable URL. Text without a scheme gets `http://`.
pub fn normalize_url(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    match url::Url::parse(text) {
        Ok(url) if url.has_host() || is_hostless_scheme(url.scheme()) => Some(text.to_string()),
        _ => Some(format!("http://{text}")),
    }
}

fn is_hostless_scheme(scheme: &str) -> bool {
    matches!(scheme, "about" | "data" | "file" | "javascript" | "mailto" | "blob")
}

impl<F: SurfaceFactory> BrowserWindow<F> {
    /// Carry out `command`.
    pub fn apply(&mut self, command: WindowCommand) {
        debug!(?command, "window command");
        match command {
            WindowCommand::Navigate { text } => self.navigate(&text),
            WindowCommand::Back => {
                if let Some(tab) = self.tabs.current_mut() {
                    tab.back();
                }
            }
            WindowCommand::Forward => {
                if let Some(tab) = self.tabs.current_mut() {
                    tab.forward();
                }
            }
            WindowCommand::Reload => {
                if let Some(tab) = self.tabs.current_mut() {
                    tab.reload();
                }
            }
            WindowCommand::NewTab => {
                let home = self.options.default_url.clone();
                self.add_tab(&home, NEW_TAB_TITLE);
            }
            WindowCommand::CloseTab { index } => {
                self.close_tab(index);
            }
            WindowCommand::CloseCurrentTab => {
                if let Some(index) = self.tabs.current_index() {
                    self.close_tab(index);
                }
            }
            WindowCommand::SelectTab { index } => {
                self.select_tab(index);
            }
            WindowCommand::NextTab => self.cycle_tab(true),
            WindowCommand::PreviousTab => self.cycle_tab(false),
            WindowCommand::MoveTab { from, to } => {
                if self.tabs.reorder(from, to) {
                    self.chrome_dirty = true;
                }
            }
            WindowCommand::CloneTab { index } => {
                self.clone_tab(index);
            }
            WindowCommand::ZoomIn => self.zoom_in(),
            WindowCommand::ZoomOut => self.zoom_out(),
            WindowCommand::ReopenClosed { index } => {
                let url = self
                    .tabs
                    .recently_closed_tail(self.options.recent_count)
                    .get(index)
                    .cloned();
                if let Some(url) = url {
                    self.add_tab(&url, NEW_TAB_TITLE);
                }
            }
            WindowCommand::OpenRecent { index } => {
                let url = self
                    .history
                    .recent_entries(self.options.recent_count)
                    .get(index)
                    .map(|e| e.url.clone());
                if let Some(url) = url {
                    self.add_tab(&url, NEW_TAB_TITLE);
                }
            }
            WindowCommand::ShowHistory => self.show_history(),
            WindowCommand::OpenLinkInNewTab => {
                if let Some(tab) = self.tabs.current() {
                    if let Err(e) = tab
                        .surface()
                        .run_script_with_result(FOCUSED_LINK_SCRIPT, ScriptPurpose::FocusedLink)
                    {
                        warn!(tab_id = %tab.id(), error = %e, "failed to query focused link");
                    }
                }
            }
            WindowCommand::DevTools => {
                if !self.options.devtools {
                    debug!("devtools disabled in config");
                } else if let Some(tab) = self.tabs.current() {
                    tab.surface().open_devtools();
                }
            }
        }
        self.chrome_dirty = true;
    }

    /// Load URL-bar text in the current tab, or a new tab if there is none.
    pub fn navigate(&mut self, text: &str) {
        let Some(url) = normalize_url(text) else {
            return;
        };
        match self.tabs.current_mut() {
            Some(tab) => tab.navigate(&url),
            None => {
                self.add_tab(&url, NEW_TAB_TITLE);
            }
        }
        self.chrome_dirty = true;
    }

    fn cycle_tab(&mut self, forward: bool) {
        let len = self.tabs.len();
        let Some(current) = self.tabs.current_index() else {
            return;
        };
        if len < 2 {
            return;
        }
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        self.select_tab(next);
    }

    fn show_history(&mut self) {
        let page = render_history_page(&self.history.grouped_by_date());
        if let Some(id) = self.add_tab("about:blank", HISTORY_TAB_TITLE) {
            if let Some(tab) = self.tabs.get_mut(id) {
                tab.show_html(HISTORY_TAB_TITLE, &page);
            }
        }
    }
}
