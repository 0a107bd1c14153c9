//! The toolbar: a webview strip above the tab content.
//!
//! It posts [`WindowCommand`] JSON through `window.ipc` and is redrawn from
//! [`ChromeState`] snapshots via `window.web4xChrome.update(...)`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};
use web4x_common::SurfaceError;
use web4x_tabs::{ChromeState, Viewport, WindowCommand};
use wry::raw_window_handle::HasWindowHandle;
use wry::{WebView, WebViewBuilder};

use crate::bounds::viewport_to_wry;
use crate::events::PageLoadState;

/// Toolbar page: tab strip, navigation row and the two recent lists.
pub const CHROME_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<style>
  * { box-sizing: border-box; }
  body {
    margin: 0; font: 13px system-ui, sans-serif; background: #e8edf3;
    user-select: none; overflow: hidden;
  }
  #tabs { display: flex; height: 34px; padding: 4px 4px 0; gap: 2px; overflow-x: auto; }
  .tab {
    display: flex; align-items: center; gap: 6px; min-width: 80px; max-width: 200px;
    padding: 0 8px; border-radius: 6px 6px 0 0; background: #d3dbe5; cursor: default;
  }
  .tab.current { background: #ffffff; }
  .tab .title { flex: 1; overflow: hidden; white-space: nowrap; text-overflow: ellipsis; }
  .tab .close { border: none; background: none; cursor: pointer; padding: 0 2px; }
  #tabs .add { border: none; background: none; font-size: 16px; cursor: pointer; }
  #bar { display: flex; align-items: center; gap: 4px; height: 42px; padding: 0 6px; background: #fff; }
  #bar button { border: none; background: none; font-size: 15px; cursor: pointer; padding: 4px 6px; }
  #bar button:disabled { opacity: 0.35; cursor: default; }
  #url { flex: 1; height: 28px; padding: 0 10px; border: 1px solid #c5cdd8; border-radius: 14px; }
  #zoom { min-width: 84px; text-align: center; color: #445; }
  select { max-width: 140px; }
</style>
</head>
<body>
<div id="tabs"></div>
<div id="bar">
  <button id="back" title="Back">&#8592;</button>
  <button id="forward" title="Forward">&#8594;</button>
  <button id="reload" title="Reload">&#8635;</button>
  <input id="url" spellcheck="false" placeholder="Search or enter address">
  <button id="link" title="Open focused link in new tab">&#8599;</button>
  <button id="zoom-out" title="Zoom out">&#8722;</button>
  <span id="zoom"></span>
  <button id="zoom-in" title="Zoom in">+</button>
  <select id="closed"><option value="">Recently closed</option></select>
  <select id="recent"><option value="">Recent history</option></select>
  <button id="history" title="History">&#9776;</button>
  <button id="devtools" title="Developer tools">&#9881;</button>
</div>
<script>
(function() {
  function send(kind, fields) {
    var msg = Object.assign({ kind: kind }, fields || {});
    window.ipc.postMessage(JSON.stringify(msg));
  }

  function click(id, kind) {
    document.getElementById(id).addEventListener('click', function() { send(kind); });
  }

  click('back', 'back');
  click('forward', 'forward');
  click('reload', 'reload');
  click('link', 'open_link_in_new_tab');
  click('zoom-in', 'zoom_in');
  click('zoom-out', 'zoom_out');
  click('history', 'show_history');
  click('devtools', 'dev_tools');

  var url = document.getElementById('url');
  url.addEventListener('keydown', function(e) {
    if (e.key === 'Enter') {
      send('navigate', { text: url.value });
      url.blur();
    }
  });
  url.addEventListener('focus', function() { url.select(); });

  function pick(id, kind) {
    var select = document.getElementById(id);
    select.addEventListener('change', function() {
      if (select.value !== '') send(kind, { index: Number(select.value) });
      select.selectedIndex = 0;
    });
  }
  pick('closed', 'reopen_closed');
  pick('recent', 'open_recent');

  function fill(id, label, urls) {
    var select = document.getElementById(id);
    select.innerHTML = '';
    var head = document.createElement('option');
    head.value = '';
    head.textContent = label;
    select.appendChild(head);
    urls.forEach(function(u, i) {
      var option = document.createElement('option');
      option.value = String(i);
      option.textContent = u;
      select.appendChild(option);
    });
    select.disabled = urls.length === 0;
  }

  var dragFrom = null;

  function renderTabs(state) {
    var strip = document.getElementById('tabs');
    strip.innerHTML = '';
    state.tabs.forEach(function(tab, i) {
      var el = document.createElement('div');
      el.className = 'tab' + (i === state.current ? ' current' : '');
      el.title = tab.url;
      el.draggable = true;

      var title = document.createElement('span');
      title.className = 'title';
      title.textContent = tab.title || tab.url;
      el.appendChild(title);

      var close = document.createElement('button');
      close.className = 'close';
      close.textContent = '×';
      close.addEventListener('click', function(e) {
        e.stopPropagation();
        send('close_tab', { index: i });
      });
      el.appendChild(close);

      el.addEventListener('click', function() { send('select_tab', { index: i }); });
      el.addEventListener('auxclick', function(e) {
        if (e.button === 1) send('close_tab', { index: i });
      });
      el.addEventListener('contextmenu', function(e) {
        e.preventDefault();
        send('clone_tab', { index: i });
      });
      el.addEventListener('dragstart', function() { dragFrom = i; });
      el.addEventListener('dragover', function(e) { e.preventDefault(); });
      el.addEventListener('drop', function(e) {
        e.preventDefault();
        if (dragFrom !== null && dragFrom !== i) send('move_tab', { from: dragFrom, to: i });
        dragFrom = null;
      });
      strip.appendChild(el);
    });

    var add = document.createElement('button');
    add.className = 'add';
    add.title = 'New tab';
    add.textContent = '+';
    add.addEventListener('click', function() { send('new_tab'); });
    strip.appendChild(add);
  }

  window.web4xChrome = {
    update: function(state) {
      renderTabs(state);
      if (document.activeElement !== url) url.value = state.url;
      document.getElementById('back').disabled = !state.can_go_back;
      document.getElementById('forward').disabled = !state.can_go_forward;
      document.getElementById('zoom').textContent = state.zoom_label;
      fill('closed', 'Recently closed', state.recently_closed);
      fill('recent', 'Recent history', state.recent_history);
      document.title = state.window_title;
    }
  };
})();
</script>
</body>
</html>
"#;

/// JS that redraws the toolbar from `state`.
pub fn js_update_chrome(state: &ChromeState) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(state)?;
    Ok(format!(
        "window.web4xChrome && window.web4xChrome.update({json});"
    ))
}

/// The toolbar webview and the commands it has posted.
pub struct ChromeBar {
    webview: WebView,
    commands: Arc<Mutex<Vec<WindowCommand>>>,
    loaded: Arc<AtomicBool>,
}

impl ChromeBar {
    /// Build the toolbar as a child of `window`, placed at `viewport`.
    pub fn new<W: HasWindowHandle>(
        window: &W,
        viewport: Viewport,
        devtools: bool,
    ) -> Result<Self, SurfaceError> {
        let commands = Arc::new(Mutex::new(Vec::new()));
        let loaded = Arc::new(AtomicBool::new(false));

        let queue = Arc::clone(&commands);
        let ready = Arc::clone(&loaded);
        let webview = WebViewBuilder::new()
            .with_bounds(viewport_to_wry(viewport))
            .with_devtools(devtools)
            .with_focused(false)
            .with_html(CHROME_HTML)
            .with_ipc_handler(move |request| {
                let Some(command) = WindowCommand::from_json(request.body()) else {
                    return;
                };
                if let Ok(mut queue) = queue.lock() {
                    queue.push(command);
                }
            })
            .with_on_page_load_handler(move |event, _url| {
                if PageLoadState::from(event) == PageLoadState::Finished {
                    ready.store(true, Ordering::SeqCst);
                }
            })
            .build_as_child(window)
            .map_err(|e| SurfaceError::Create(e.to_string()))?;

        debug!("toolbar created");
        Ok(Self {
            webview,
            commands,
            loaded,
        })
    }

    /// Commands posted since the last call, oldest first.
    pub fn drain_commands(&self) -> Vec<WindowCommand> {
        match self.commands.lock() {
            Ok(mut queue) => std::mem::take(&mut *queue),
            Err(_) => Vec::new(),
        }
    }

    /// True once after each toolbar page load. The toolbar is blank until
    /// it gets a full state.
    pub fn take_loaded(&self) -> bool {
        self.loaded.swap(false, Ordering::SeqCst)
    }

    pub fn update(&self, state: &ChromeState) {
        let script = match js_update_chrome(state) {
            Ok(script) => script,
            Err(e) => {
                warn!(error = %e, "failed to encode chrome state");
                return;
            }
        };
        if let Err(e) = self.webview.evaluate_script(&script) {
            warn!(error = %e, "failed to update toolbar");
        }
    }

    pub fn set_viewport(&self, viewport: Viewport) {
        if let Err(e) = self.webview.set_bounds(viewport_to_wry(viewport)) {
            warn!(error = %e, "failed to resize toolbar");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use web4x_tabs::TabSummary;

    fn state() -> ChromeState {
        ChromeState {
            tabs: vec![TabSummary {
                title: "Example".into(),
                url: "https://a.example".into(),
                loaded: true,
            }],
            current: Some(0),
            url: "https://a.example".into(),
            window_title: "Example - Web4x Browser".into(),
            can_go_back: false,
            can_go_forward: false,
            zoom_label: "Zoom: 100%".into(),
            recently_closed: vec![],
            recent_history: vec!["https://a.example".into()],
        }
    }

    #[test]
    fn update_script_calls_chrome_runtime() {
        let js = js_update_chrome(&state()).unwrap();
        assert!(js.starts_with("window.web4xChrome && window.web4xChrome.update({"));
        assert!(js.contains("\"zoom_label\":\"Zoom: 100%\""));
        assert!(js.contains("\"current\":0"));
    }

    #[test]
    fn toolbar_posts_known_command_kinds() {
        for kind in [
            "back",
            "forward",
            "reload",
            "navigate",
            "new_tab",
            "close_tab",
            "select_tab",
            "move_tab",
            "clone_tab",
            "zoom_in",
            "zoom_out",
            "reopen_closed",
            "open_recent",
            "show_history",
            "open_link_in_new_tab",
            "dev_tools",
        ] {
            assert!(
                CHROME_HTML.contains(&format!("'{kind}'")),
                "toolbar never sends {kind}"
            );
        }
    }

    #[test]
    fn toolbar_commands_parse() {
        assert_eq!(
            WindowCommand::from_json(r#"{"kind":"dev_tools"}"#),
            Some(WindowCommand::DevTools)
        );
        assert_eq!(
            WindowCommand::from_json(r#"{"kind":"open_link_in_new_tab"}"#),
            Some(WindowCommand::OpenLinkInNewTab)
        );
        assert_eq!(
            WindowCommand::from_json(r#"{"kind":"reopen_closed","index":1}"#),
            Some(WindowCommand::ReopenClosed { index: 1 })
        );
    }
}
