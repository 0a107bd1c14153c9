//! Ordered tab collection with a current selection.

use tracing::{debug, info, warn};
use web4x_common::{SurfaceError, TabId};

use crate::surface::{ContentSurface, SurfaceFactory, TabEvent, Viewport};
use crate::tab::{Tab, TabNotice};

/// Owns every tab of a window.
///
/// `current` always indexes a live tab or is `None` when there are no tabs.
/// Ids are handed out monotonically and never reused, so an id held by a
/// late callback can only ever resolve to its own tab or to nothing.
pub struct TabManager<F: SurfaceFactory> {
    factory: F,
    tabs: Vec<Tab<F::Surface>>,
    current: Option<usize>,
    next_id: u64,
    recently_closed: Vec<String>,
}

impl<F: SurfaceFactory> TabManager<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            tabs: Vec::new(),
            current: None,
            next_id: 1,
            recently_closed: Vec::new(),
        }
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    // -------------------------------------------------------------------------
    // Lookup
    // -------------------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn tabs(&self) -> &[Tab<F::Surface>] {
        &self.tabs
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current(&self) -> Option<&Tab<F::Surface>> {
        self.current.and_then(|i| self.tabs.get(i))
    }

    pub fn current_mut(&mut self) -> Option<&mut Tab<F::Surface>> {
        self.current.and_then(|i| self.tabs.get_mut(i))
    }

    pub fn index_of(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id() == id)
    }

    pub fn get(&self, id: TabId) -> Option<&Tab<F::Surface>> {
        self.tabs.iter().find(|t| t.id() == id)
    }

    pub fn get_mut(&mut self, id: TabId) -> Option<&mut Tab<F::Surface>> {
        self.tabs.iter_mut().find(|t| t.id() == id)
    }

    /// URLs of the live tabs in display order.
    pub fn urls(&self) -> Vec<String> {
        self.tabs.iter().map(|t| t.url().to_string()).collect()
    }

    /// URLs worth restoring next launch: live tabs in display order,
    /// generated pages left out.
    pub fn session_urls(&self) -> Vec<String> {
        self.tabs
            .iter()
            .filter(|t| t.is_persistent())
            .map(|t| t.url().to_string())
            .collect()
    }

    /// Every closed tab's URL, oldest first.
    pub fn recently_closed(&self) -> &[String] {
        &self.recently_closed
    }

    /// The last `n` closed URLs, oldest first.
    pub fn recently_closed_tail(&self, n: usize) -> &[String] {
        let start = self.recently_closed.len().saturating_sub(n);
        &self.recently_closed[start..]
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Open `url` in a new last tab and make it current.
    pub fn add_tab(&mut self, url: &str, title: &str) -> Result<TabId, SurfaceError> {
        let id = TabId(self.next_id);
        let surface = self.factory.create(id, url)?;
        self.next_id += 1;

        self.tabs.push(Tab::new(id, url, title, surface));
        info!(tab_id = %id, url, "tab opened");
        self.select_tab(self.tabs.len() - 1);
        Ok(id)
    }

    /// Close the tab at `index`, returning its id.
    ///
    /// If it was current the tab now at `index` (or the new last tab)
    /// becomes current. Its URL is appended to the recently-closed list.
    pub fn close_tab(&mut self, index: usize) -> Option<TabId> {
        if index >= self.tabs.len() {
            return None;
        }
        let closed = self.tabs.remove(index);
        self.recently_closed.push(closed.url().to_string());
        info!(tab_id = %closed.id(), url = %closed.url(), "tab closed");

        self.current = match self.current {
            Some(c) if c == index => {
                if self.tabs.is_empty() {
                    None
                } else {
                    let next = index.min(self.tabs.len() - 1);
                    self.show(next);
                    Some(next)
                }
            }
            Some(c) if c > index => Some(c - 1),
            other => other,
        };
        Some(closed.id())
    }

    /// Move a tab; the current tab stays current wherever it ends up.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        if from >= self.tabs.len() || to >= self.tabs.len() {
            return false;
        }
        if from == to {
            return true;
        }
        let current_id = self.current().map(Tab::id);
        let tab = self.tabs.remove(from);
        self.tabs.insert(to, tab);
        self.current = current_id.and_then(|id| self.index_of(id));
        true
    }

    /// Make the tab at `index` current, hiding the previous one.
    pub fn select_tab(&mut self, index: usize) -> bool {
        if index >= self.tabs.len() {
            return false;
        }
        if let Some(previous) = self.current.filter(|&p| p != index) {
            if let Some(tab) = self.tabs.get(previous) {
                if let Err(e) = tab.surface().set_visible(false) {
                    warn!(tab_id = %tab.id(), error = %e, "failed to hide tab");
                }
            }
        }
        self.show(index);
        self.current = Some(index);
        true
    }

    /// Open a new tab at the URL of the tab at `index`, keeping its title.
    pub fn clone_tab(&mut self, index: usize) -> Result<Option<TabId>, SurfaceError> {
        let Some(source) = self.tabs.get(index) else {
            return Ok(None);
        };
        let (url, title) = (source.url().to_string(), source.title().to_string());
        self.add_tab(&url, &title).map(Some)
    }

    /// Resize every surface to `viewport`.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.factory.set_viewport(viewport);
        for tab in &self.tabs {
            if let Err(e) = tab.surface().set_viewport(viewport) {
                warn!(tab_id = %tab.id(), error = %e, "failed to resize tab");
            }
        }
    }

    /// Route a surface event to its tab. Events for closed tabs are dropped.
    pub fn handle_surface_event(&mut self, event: TabEvent) -> Option<(TabId, TabNotice)> {
        let TabEvent { tab, event } = event;
        match self.get_mut(tab) {
            Some(t) => t.handle(event).map(|notice| (tab, notice)),
            None => {
                debug!(tab_id = %tab, ?event, "event for closed tab discarded");
                None
            }
        }
    }

    fn show(&self, index: usize) {
        if let Some(tab) = self.tabs.get(index) {
            if let Err(e) = tab.surface().set_visible(true) {
                warn!(tab_id = %tab.id(), error = %e, "failed to show tab");
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::mock::{Call, MockFactory};
    use crate::surface::SurfaceEvent;

    fn manager_with(urls: &[&str]) -> TabManager<MockFactory> {
        let mut manager = TabManager::new(MockFactory::default());
        for url in urls {
            manager.add_tab(url, "New Tab").unwrap();
        }
        manager
    }

    #[test]
    fn add_tab_appends_and_selects() {
        let mut manager = manager_with(&["a"]);
        let id = manager.add_tab("b", "New Tab").unwrap();
        assert_eq!(manager.len(), 2);
        assert_eq!(manager.current_index(), Some(1));
        assert_eq!(manager.current().unwrap().id(), id);
    }

    #[test]
    fn ids_are_never_reused() {
        let mut manager = manager_with(&["a", "b"]);
        manager.close_tab(1);
        let id = manager.add_tab("c", "New Tab").unwrap();
        assert_eq!(id, TabId(3));
    }

    #[test]
    fn failed_surface_creation_adds_nothing() {
        let factory = MockFactory {
            fail_next: true,
            ..Default::default()
        };
        let mut manager = TabManager::new(factory);
        assert!(manager.add_tab("x", "New Tab").is_err());
        assert!(manager.is_empty());
        assert_eq!(manager.current_index(), None);
        assert_eq!(manager.add_tab("y", "New Tab").unwrap(), TabId(1));
    }

    #[test]
    fn closing_only_tab_leaves_no_selection() {
        let mut manager = manager_with(&["a"]);
        assert_eq!(manager.close_tab(0), Some(TabId(1)));
        assert!(manager.is_empty());
        assert_eq!(manager.current_index(), None);
        assert!(manager.current().is_none());

        manager.add_tab("b", "New Tab").unwrap();
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.current_index(), Some(0));
    }

    #[test]
    fn closing_current_selects_neighbor_at_same_index() {
        let mut manager = manager_with(&["a", "b", "c"]);
        manager.select_tab(1);
        manager.close_tab(1);
        assert_eq!(manager.current().unwrap().url(), "c");
    }

    #[test]
    fn closing_current_last_tab_selects_previous() {
        let mut manager = manager_with(&["a", "b", "c"]);
        manager.close_tab(2);
        assert_eq!(manager.current_index(), Some(1));
        assert_eq!(manager.current().unwrap().url(), "b");
    }

    #[test]
    fn closing_before_current_keeps_current_tab() {
        let mut manager = manager_with(&["a", "b", "c"]);
        manager.close_tab(0);
        assert_eq!(manager.current().unwrap().url(), "c");
        assert_eq!(manager.current_index(), Some(1));
    }

    #[test]
    fn closing_records_recently_closed() {
        let mut manager = manager_with(&["a", "b", "c", "d", "e", "f", "g"]);
        for _ in 0..7 {
            manager.close_tab(0);
        }
        assert_eq!(manager.recently_closed().len(), 7);
        assert_eq!(manager.recently_closed_tail(5), &["c", "d", "e", "f", "g"]);
        assert!(manager.close_tab(0).is_none());
    }

    #[test]
    fn reorder_keeps_current_tab_current() {
        let mut manager = manager_with(&["a", "b", "c"]);
        manager.select_tab(0);
        assert!(manager.reorder(0, 2));
        assert_eq!(manager.urls(), vec!["b", "c", "a"]);
        assert_eq!(manager.session_urls(), vec!["b", "c", "a"]);
        assert_eq!(manager.current().unwrap().url(), "a");
        assert_eq!(manager.current_index(), Some(2));
        assert!(!manager.reorder(0, 3));
    }

    #[test]
    fn select_hides_previous_and_shows_new() {
        let mut manager = manager_with(&["a", "b"]);
        manager.select_tab(0);
        let factory = manager.factory();
        assert_eq!(factory.calls_for(TabId(2)).last(), Some(&Call::Visible(false)));
        assert_eq!(factory.calls_for(TabId(1)).last(), Some(&Call::Visible(true)));
        assert!(!manager.select_tab(5));
    }

    #[test]
    fn clone_tab_copies_url_and_title_with_new_id() {
        let mut manager = manager_with(&["https://u.example"]);
        manager.handle_surface_event(TabEvent::new(
            TabId(1),
            SurfaceEvent::TitleChanged("U".into()),
        ));
        let cloned = manager.clone_tab(0).unwrap().unwrap();
        assert_ne!(cloned, TabId(1));
        let tab = manager.get(cloned).unwrap();
        assert_eq!(tab.url(), "https://u.example");
        assert_eq!(tab.title(), "U");
        assert_eq!(manager.clone_tab(9).unwrap(), None);
    }

    #[test]
    fn events_for_closed_tabs_are_discarded() {
        let mut manager = manager_with(&["a", "b"]);
        manager.close_tab(0);
        let stale = TabEvent::new(TabId(1), SurfaceEvent::TitleChanged("gone".into()));
        assert_eq!(manager.handle_surface_event(stale), None);

        let live = TabEvent::new(TabId(2), SurfaceEvent::TitleChanged("here".into()));
        assert_eq!(
            manager.handle_surface_event(live),
            Some((TabId(2), TabNotice::TitleChanged("here".into())))
        );
    }

    #[test]
    fn viewport_reaches_every_surface() {
        let mut manager = manager_with(&["a", "b"]);
        let viewport = Viewport::new(0.0, 40.0, 800.0, 560.0);
        manager.set_viewport(viewport);
        for id in [TabId(1), TabId(2)] {
            assert!(manager.factory().calls_for(id).contains(&Call::Viewport(viewport)));
        }
    }
}
