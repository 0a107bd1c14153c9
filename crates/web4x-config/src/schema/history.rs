//! Browsing history configuration.

use serde::{Deserialize, Serialize};

/// History log configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum retained history entries; oldest are evicted first
    /// (valid range: 1-10000).
    pub max_entries: usize,
    /// How many entries the quick-access lists show (recent history and
    /// recently closed tabs).
    pub recent_count: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: 100,
            recent_count: 5,
        }
    }
}
