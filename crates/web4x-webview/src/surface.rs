use std::sync::{Arc, Mutex};

use serde_json::Value;
use tracing::debug;
use web4x_common::{SurfaceError, TabId};
use web4x_tabs::{ContentSurface, ScriptPurpose, SurfaceEvent, TabEvent, Viewport};
use wry::WebView;

use crate::bounds::viewport_to_wry;
use crate::events::EventSink;
use crate::nav_history::NavHistory;

/// A tab's content, hosted in a child `wry::WebView`.
///
/// Dropping the surface destroys the webview.
pub struct WrySurface {
    pub(crate) webview: WebView,
    pub(crate) tab: TabId,
    pub(crate) nav: Arc<Mutex<NavHistory>>,
    pub(crate) events: EventSink,
}

impl WrySurface {
    pub fn tab(&self) -> TabId {
        self.tab
    }

    /// Get a reference to the underlying wry WebView.
    pub fn inner(&self) -> &WebView {
        &self.webview
    }

    fn nav<R>(&self, f: impl FnOnce(&mut NavHistory) -> R) -> Option<R> {
        self.nav.lock().ok().map(|mut nav| f(&mut nav))
    }
}

impl std::fmt::Debug for WrySurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WrySurface").field("tab", &self.tab).finish()
    }
}

fn script_error(e: wry::Error) -> SurfaceError {
    SurfaceError::Script(e.to_string())
}

fn navigation_error(e: wry::Error) -> SurfaceError {
    SurfaceError::Navigation(e.to_string())
}

fn other_error(e: wry::Error) -> SurfaceError {
    SurfaceError::Other(e.to_string())
}

/// Script results arrive JSON-encoded. Anything else is kept as text.
fn decode_script_result(raw: String) -> Value {
    serde_json::from_str(&raw).unwrap_or(Value::String(raw))
}

impl ContentSurface for WrySurface {
    fn load(&mut self, url: &str) -> Result<(), SurfaceError> {
        self.webview.load_url(url).map_err(navigation_error)
    }

    fn load_html(&mut self, html: &str) -> Result<(), SurfaceError> {
        self.webview.load_html(html).map_err(navigation_error)
    }

    fn run_script(&self, js: &str) -> Result<(), SurfaceError> {
        self.webview.evaluate_script(js).map_err(script_error)
    }

    fn run_script_with_result(&self, js: &str, purpose: ScriptPurpose) -> Result<(), SurfaceError> {
        let events = self.events.clone();
        let tab = self.tab;
        self.webview
            .evaluate_script_with_callback(js, move |raw| {
                let value = decode_script_result(raw);
                debug!(tab_id = %tab, ?purpose, "script result");
                events.push(TabEvent::new(tab, SurfaceEvent::ScriptResult { purpose, value }));
            })
            .map_err(script_error)
    }

    fn can_go_back(&self) -> bool {
        self.nav(|nav| nav.can_go_back()).unwrap_or(false)
    }

    fn can_go_forward(&self) -> bool {
        self.nav(|nav| nav.can_go_forward()).unwrap_or(false)
    }

    fn back(&mut self) -> Result<(), SurfaceError> {
        if self.nav(|nav| nav.go_back()).unwrap_or(false) {
            self.run_script("history.back();")?;
        }
        Ok(())
    }

    fn forward(&mut self) -> Result<(), SurfaceError> {
        if self.nav(|nav| nav.go_forward()).unwrap_or(false) {
            self.run_script("history.forward();")?;
        }
        Ok(())
    }

    fn reload(&mut self) -> Result<(), SurfaceError> {
        self.run_script("location.reload();")
    }

    fn set_zoom(&self, factor: f64) -> Result<(), SurfaceError> {
        self.webview.zoom(factor).map_err(other_error)
    }

    fn set_visible(&self, visible: bool) -> Result<(), SurfaceError> {
        self.webview.set_visible(visible).map_err(other_error)
    }

    fn set_viewport(&self, viewport: Viewport) -> Result<(), SurfaceError> {
        self.webview
            .set_bounds(viewport_to_wry(viewport))
            .map_err(other_error)
    }

    fn open_devtools(&self) {
        self.webview.open_devtools();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn script_results_are_decoded_as_json() {
        assert_eq!(
            decode_script_result("\"https://a.example\"".into()),
            json!("https://a.example")
        );
        assert_eq!(decode_script_result("null".into()), Value::Null);
        assert_eq!(decode_script_result("{\"a\":1}".into()), json!({"a": 1}));
    }

    #[test]
    fn undecodable_script_result_is_kept_as_text() {
        assert_eq!(
            decode_script_result("https://a.example".into()),
            json!("https://a.example")
        );
    }
}
