//! Key/value settings store.
//!
//! The browser persists only a handful of values (the open-tab session) and
//! treats the store as an opaque `get`/`set` surface. `JsonSettingsStore`
//! keeps the values in a single JSON object on disk; `MemorySettingsStore`
//! is the in-process equivalent used by tests and `--no-restore` runs.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, warn};
use web4x_common::ConfigError;

use crate::atomic_write::write_atomic;

/// A persistent key/value store.
pub trait SettingsStore {
    /// Read the value stored under `key`.
    fn value(&self, key: &str) -> Option<Value>;

    /// Store `value` under `key`, persisting it.
    fn set_value(&mut self, key: &str, value: Value) -> Result<(), ConfigError>;
}

// =============================================================================
// JSON FILE STORE
// =============================================================================

/// Settings kept as one JSON object in a file.
#[derive(Debug)]
pub struct JsonSettingsStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl JsonSettingsStore {
    /// Open the store at `path`. A missing file is an empty store; a corrupt
    /// file is logged and treated as empty so startup never fails on it.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Value>(&content) {
                Ok(Value::Object(map)) => map,
                Ok(_) => {
                    warn!(path = %path.display(), "settings file is not a JSON object, ignoring");
                    Map::new()
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "settings file is corrupt, ignoring");
                    Map::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read settings file");
                Map::new()
            }
        };
        debug!(path = %path.display(), keys = values.len(), "settings store opened");
        Self { path, values }
    }

    /// The file backing this store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), ConfigError> {
        let json = serde_json::to_vec_pretty(&self.values)
            .map_err(|e| ConfigError::SettingsError(format!("failed to serialize settings: {e}")))?;
        write_atomic(&self.path, &json).map_err(ConfigError::SettingsError)
    }
}

impl SettingsStore for JsonSettingsStore {
    fn value(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set_value(&mut self, key: &str, value: Value) -> Result<(), ConfigError> {
        self.values.insert(key.to_string(), value);
        self.flush()
    }
}

// =============================================================================
// IN-MEMORY STORE
// =============================================================================

/// Settings that live only as long as the process.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    values: BTreeMap<String, Value>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn value(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set_value(&mut self, key: &str, value: Value) -> Result<(), ConfigError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
