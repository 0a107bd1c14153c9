//! Open-tab session persistence.

use serde_json::Value;
use tracing::{debug, warn};
use web4x_common::ConfigError;
use web4x_config::SettingsStore;

/// Settings key holding the ordered list of open URLs.
pub const SESSION_KEY: &str = "openTabs";

/// Store `urls` as the session to restore next time.
pub fn save_session(store: &mut dyn SettingsStore, urls: &[String]) -> Result<(), ConfigError> {
    let value = Value::Array(urls.iter().cloned().map(Value::String).collect());
    store.set_value(SESSION_KEY, value)?;
    debug!(tabs = urls.len(), "session saved");
    Ok(())
}

/// The saved session. Anything that isn't a list of strings is skipped.
pub fn load_session(store: &dyn SettingsStore) -> Vec<String> {
    match store.value(SESSION_KEY) {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(url) => Some(url),
                other => {
                    warn!(entry = %other, "ignoring non-string session entry");
                    None
                }
            })
            .collect(),
        Some(other) => {
            warn!(value = %other, "saved session is not a list, ignoring");
            Vec::new()
        }
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use web4x_config::{JsonSettingsStore, MemorySettingsStore};

    #[test]
    fn round_trip_preserves_order() {
        let mut store = MemorySettingsStore::new();
        let urls: Vec<String> = ["A", "B", "C"].iter().map(|s| s.to_string()).collect();
        save_session(&mut store, &urls).unwrap();
        assert_eq!(load_session(&store), urls);
    }

    #[test]
    fn round_trip_through_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        let urls = vec!["https://a.example".to_string(), "https://b.example".to_string()];

        let mut store = JsonSettingsStore::open(&path);
        save_session(&mut store, &urls).unwrap();

        let reopened = JsonSettingsStore::open(&path);
        assert_eq!(load_session(&reopened), urls);
    }

    #[test]
    fn missing_session_is_empty() {
        assert!(load_session(&MemorySettingsStore::new()).is_empty());
    }

    #[test]
    fn non_string_entries_are_ignored() {
        let mut store = MemorySettingsStore::new();
        store
            .set_value(SESSION_KEY, json!(["https://a.example", 42, null, "https://b.example"]))
            .unwrap();
        assert_eq!(load_session(&store), vec!["https://a.example", "https://b.example"]);
    }

    #[test]
    fn non_list_value_is_ignored() {
        let mut store = MemorySettingsStore::new();
        store.set_value(SESSION_KEY, json!("https://a.example")).unwrap();
        assert!(load_session(&store).is_empty());
    }
}
