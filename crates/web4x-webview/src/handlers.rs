use std::sync::{Arc, Mutex};

use tracing::{debug, warn};
use web4x_common::TabId;
use web4x_tabs::{SurfaceEvent, TabEvent};
use wry::WebViewBuilder;

use crate::events::{EventSink, PageLoadState};
use crate::nav_history::NavHistory;

// =============================================================================
// NAVIGATION SCHEMES
// =============================================================================

/// URL schemes a tab may navigate to. Anything else (`mailto:`, app links)
/// would hand off to an external program, which the browser does not do.
pub const ALLOWED_NAV_SCHEMES: &[&str] = &["http", "https", "file", "about", "data", "blob"];

/// Check whether a navigation target uses an allowed scheme.
pub fn is_navigation_allowed(url: &str) -> bool {
    let Some((scheme, _)) = url.split_once(':') else {
        return false;
    };
    ALLOWED_NAV_SCHEMES
        .iter()
        .any(|allowed| scheme.eq_ignore_ascii_case(allowed))
}

// =============================================================================
// HANDLER ATTACHMENTS
// =============================================================================

/// Page script -> host. Bodies that are not JSON never reach the bridge.
pub(crate) fn attach_ipc_handler<'a>(
    builder: WebViewBuilder<'a>,
    events: EventSink,
    tab: TabId,
) -> WebViewBuilder<'a> {
    builder.with_ipc_handler(move |request| {
        let body = request.body().to_string();

        if serde_json::from_str::<serde_json::Value>(&body).is_err() {
            warn!(
                tab_id = %tab,
                body_len = body.len(),
                "IPC message rejected: invalid JSON"
            );
            return;
        }

        debug!(tab_id = %tab, body_len = body.len(), "IPC message from page");
        events.push(TabEvent::new(tab, SurfaceEvent::Ipc(body)));
    })
}

/// `Started` moves the URL and the back/forward list; `Finished` reports a
/// completed load. The engine gives no failure signal here, so every
/// finished load counts as a success.
pub(crate) fn attach_page_load_handler<'a>(
    builder: WebViewBuilder<'a>,
    events: EventSink,
    nav: Arc<Mutex<NavHistory>>,
    tab: TabId,
) -> WebViewBuilder<'a> {
    builder.with_on_page_load_handler(move |event, url| {
        let state = PageLoadState::from(event);
        debug!(tab_id = %tab, ?state, url = %url, "page load");
        let event = match state {
            PageLoadState::Started => {
                if let Ok(mut nav) = nav.lock() {
                    nav.visit(&url);
                }
                SurfaceEvent::UrlChanged(url)
            }
            PageLoadState::Finished => SurfaceEvent::LoadFinished { url, ok: true },
        };
        events.push(TabEvent::new(tab, event));
    })
}

pub(crate) fn attach_title_handler<'a>(
    builder: WebViewBuilder<'a>,
    events: EventSink,
    tab: TabId,
) -> WebViewBuilder<'a> {
    builder.with_document_title_changed_handler(move |title| {
        debug!(tab_id = %tab, title = %title, "title changed");
        events.push(TabEvent::new(tab, SurfaceEvent::TitleChanged(title)));
    })
}

pub(crate) fn attach_navigation_handler<'a>(
    builder: WebViewBuilder<'a>,
    tab: TabId,
) -> WebViewBuilder<'a> {
    builder.with_navigation_handler(move |url| {
        if !is_navigation_allowed(&url) {
            warn!(tab_id = %tab, url = %url, "navigation blocked: unsupported scheme");
            return false;
        }
        true
    })
}

/// Files dropped on the page open as tabs instead of replacing the page.
pub(crate) fn attach_drag_drop_handler<'a>(
    builder: WebViewBuilder<'a>,
    events: EventSink,
    tab: TabId,
) -> WebViewBuilder<'a> {
    builder.with_drag_drop_handler(move |event| match event {
        wry::DragDropEvent::Drop { paths, .. } => {
            debug!(tab_id = %tab, count = paths.len(), "files dropped");
            events.push(TabEvent::new(tab, SurfaceEvent::FilesDropped(paths)));
            true
        }
        _ => false,
    })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_web_and_local_schemes() {
        assert!(is_navigation_allowed("https://example.com/"));
        assert!(is_navigation_allowed("http://localhost:8080"));
        assert!(is_navigation_allowed("file:///tmp/page.html"));
        assert!(is_navigation_allowed("about:blank"));
        assert!(is_navigation_allowed("data:text/html,<p>hi</p>"));
        assert!(is_navigation_allowed("HTTPS://EXAMPLE.COM"));
    }

    #[test]
    fn blocks_external_handlers() {
        assert!(!is_navigation_allowed("mailto:someone@example.com"));
        assert!(!is_navigation_allowed("zoommtg://join"));
        assert!(!is_navigation_allowed("no-scheme-at-all"));
        assert!(!is_navigation_allowed(""));
    }
}
