//! Event plumbing from webview callbacks to the event loop.

use std::sync::{Arc, Mutex};

use web4x_tabs::TabEvent;

/// State of a page load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLoadState {
    /// Navigation has started.
    Started,
    /// Page has fully loaded.
    Finished,
}

impl From<wry::PageLoadEvent> for PageLoadState {
    fn from(e: wry::PageLoadEvent) -> Self {
        match e {
            wry::PageLoadEvent::Started => Self::Started,
            wry::PageLoadEvent::Finished => Self::Finished,
        }
    }
}

/// Queue of tab events shared between webview callbacks and the event loop.
///
/// Callbacks push; the event loop drains once per poll. A poisoned lock
/// drops events rather than panicking inside an engine callback.
#[derive(Debug, Clone, Default)]
pub struct EventSink {
    inner: Arc<Mutex<Vec<TabEvent>>>,
}

impl EventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: TabEvent) {
        if let Ok(mut events) = self.inner.lock() {
            events.push(event);
        }
    }

    /// Take every queued event, oldest first.
    pub fn drain(&self) -> Vec<TabEvent> {
        match self.inner.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(_) => Vec::new(),
        }
    }
}
