//! Back/forward bookkeeping for a tab's webview.
//!
//! The engine does not report its session history, so it is rebuilt from
//! page-load notifications. Back and forward steps move the cursor when they
//! are requested, so the load that follows matches the current entry. Any
//! other load truncates the forward list and pushes, even when it happens to
//! reach the previous URL through a link or a page-driven `history.back()`.

/// Visited URLs of one tab plus the position of the current page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavHistory {
    entries: Vec<String>,
    cursor: Option<usize>,
}

impl NavHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&str> {
        self.cursor.map(|c| self.entries[c].as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record that `url` started loading.
    pub fn visit(&mut self, url: &str) {
        let Some(cursor) = self.cursor else {
            self.entries.push(url.to_string());
            self.cursor = Some(0);
            return;
        };

        if self.entries[cursor] == url {
            return;
        }

        self.entries.truncate(cursor + 1);
        self.entries.push(url.to_string());
        self.cursor = Some(self.entries.len() - 1);
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.entries.len())
    }

    /// Step back. Returns false at the first entry.
    pub fn go_back(&mut self) -> bool {
        match self.cursor {
            Some(c) if c > 0 => {
                self.cursor = Some(c - 1);
                true
            }
            _ => false,
        }
    }

    /// Step forward. Returns false at the last entry.
    pub fn go_forward(&mut self) -> bool {
        if !self.can_go_forward() {
            return false;
        }
        self.cursor = self.cursor.map(|c| c + 1);
        true
    }
}
