//! File-system capability.
//!
//! Every operation takes a path relative to a fixed base directory and
//! answers with an event: a named success event carrying the relative path
//! (plus the content for reads), or `errorOccurred` carrying the failure
//! message. Failures are never raised out of the capability.

mod paths;

use std::path::{Path, PathBuf};
use std::str::FromStr;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, warn};
use web4x_common::BridgeError;

use crate::capability::{string_arg, Capability};
use crate::channel::EventEmitter;

pub use paths::resolve_within;

/// Name the capability is registered under.
pub const FILE_SYSTEM_HANDLER: &str = "fileSystemHandler";

pub const FILE_CREATED: &str = "fileCreated";
pub const DIRECTORY_CREATED: &str = "directoryCreated";
pub const FILE_CHANGED: &str = "fileChanged";
pub const FILE_DELETED: &str = "fileDeleted";
pub const DIRECTORY_DELETED: &str = "directoryDeleted";
pub const FILE_READ: &str = "fileRead";
pub const ERROR_OCCURRED: &str = "errorOccurred";

const METHODS: &[&str] = &[
    "createFile",
    "createDirectory",
    "writeFile",
    "changeFileContent",
    "deleteFile",
    "deleteDirectory",
    "readFile",
];

/// The operations page script can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsMethod {
    CreateFile,
    CreateDirectory,
    WriteFile,
    DeleteFile,
    DeleteDirectory,
    ReadFile,
}

impl FromStr for FsMethod {
    type Err = ();

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "createFile" => Ok(Self::CreateFile),
            "createDirectory" => Ok(Self::CreateDirectory),
            "writeFile" | "changeFileContent" => Ok(Self::WriteFile),
            "deleteFile" => Ok(Self::DeleteFile),
            "deleteDirectory" => Ok(Self::DeleteDirectory),
            "readFile" => Ok(Self::ReadFile),
            _ => Err(()),
        }
    }
}

impl FsMethod {
    /// Event emitted when the operation succeeds.
    pub fn success_event(self) -> &'static str {
        match self {
            Self::CreateFile => FILE_CREATED,
            Self::CreateDirectory => DIRECTORY_CREATED,
            Self::WriteFile => FILE_CHANGED,
            Self::DeleteFile => FILE_DELETED,
            Self::DeleteDirectory => DIRECTORY_DELETED,
            Self::ReadFile => FILE_READ,
        }
    }

    fn takes_content(self) -> bool {
        matches!(self, Self::CreateFile | Self::WriteFile)
    }
}

/// Create, write, read and delete files under a base directory.
#[derive(Debug, Clone)]
pub struct FileSystemCapability {
    base_dir: PathBuf,
    confine: bool,
}

impl FileSystemCapability {
    /// Capability rooted at `base_dir` that refuses paths escaping it.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            confine: true,
        }
    }

    /// Toggle the containment check. Without it paths are joined as given.
    pub fn with_confinement(mut self, confine: bool) -> Self {
        self.confine = confine;
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Absolute path for `relative`.
    pub fn resolve(&self, relative: &str) -> Result<PathBuf, String> {
        if self.confine {
            resolve_within(&self.base_dir, relative)
        } else {
            Ok(self.base_dir.join(relative))
        }
    }

    /// Perform `method` and return the success payload or the failure message.
    pub async fn run(
        &self,
        method: FsMethod,
        relative: &str,
        content: Option<&str>,
    ) -> Result<Value, String> {
        let full = self.resolve(relative)?;
        let content = content.unwrap_or_default();

        match method {
            FsMethod::CreateFile | FsMethod::WriteFile => {
                tokio::fs::write(&full, content).await.map_err(|e| e.to_string())?;
            }
            FsMethod::CreateDirectory => {
                tokio::fs::create_dir_all(&full).await.map_err(|e| e.to_string())?;
            }
            FsMethod::DeleteFile => {
                tokio::fs::remove_file(&full).await.map_err(|e| e.to_string())?;
            }
            FsMethod::DeleteDirectory => {
                tokio::fs::remove_dir(&full).await.map_err(|e| e.to_string())?;
            }
            FsMethod::ReadFile => {
                let text = tokio::fs::read_to_string(&full)
                    .await
                    .map_err(|e| e.to_string())?;
                return Ok(json!({ "path": relative, "content": text }));
            }
        }
        Ok(json!({ "path": relative }))
    }
}

#[async_trait]
impl Capability for FileSystemCapability {
    fn methods(&self) -> &'static [&'static str] {
        METHODS
    }

    async fn invoke(
        &self,
        method: &str,
        args: Vec<Value>,
        events: &EventEmitter,
    ) -> Result<Value, BridgeError> {
        let op = FsMethod::from_str(method).map_err(|_| BridgeError::UnknownMethod {
            capability: FILE_SYSTEM_HANDLER.to_string(),
            method: method.to_string(),
        })?;
        let path = string_arg(method, &args, 0)?;
        let content = if op.takes_content() {
            Some(string_arg(method, &args, 1)?)
        } else {
            None
        };

        match self.run(op, path, content).await {
            Ok(payload) => {
                debug!(?op, path, "file operation succeeded");
                events.emit(op.success_event(), payload.clone());
                Ok(payload)
            }
            Err(message) => {
                warn!(?op, path, %message, "file operation failed");
                events.emit(ERROR_OCCURRED, json!({ "message": message }));
                Ok(Value::Null)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::BridgeChannel;
    use crate::protocol::BridgeEvent;
    use tempfile::TempDir;

    fn channel_in(dir: &TempDir) -> BridgeChannel {
        let mut channel = BridgeChannel::new();
        channel
            .register(FILE_SYSTEM_HANDLER, FileSystemCapability::new(dir.path()))
            .unwrap();
        channel
    }

    async fn call(channel: &BridgeChannel, method: &str, args: &[&str]) -> Value {
        let args = args.iter().map(|a| json!(a)).collect();
        channel.invoke(FILE_SYSTEM_HANDLER, method, args).await.unwrap()
    }

    #[tokio::test]
    async fn create_then_read_round_trips_content() {
        let dir = TempDir::new().unwrap();
        let channel = channel_in(&dir);

        call(&channel, "createFile", &["notes.txt", "hello"]).await;
        call(&channel, "readFile", &["notes.txt"]).await;

        let events = channel.flush(|_, _| {});
        assert_eq!(
            events,
            vec![
                BridgeEvent::new(FILE_SYSTEM_HANDLER, FILE_CREATED, json!({"path": "notes.txt"})),
                BridgeEvent::new(
                    FILE_SYSTEM_HANDLER,
                    FILE_READ,
                    json!({"path": "notes.txt", "content": "hello"})
                ),
            ]
        );
    }

    #[tokio::test]
    async fn deleting_non_empty_directory_emits_error() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("nonempty")).unwrap();
        std::fs::write(dir.path().join("nonempty").join("keep.txt"), "x").unwrap();
        let channel = channel_in(&dir);

        let result = call(&channel, "deleteDirectory", &["nonempty"]).await;
        assert_eq!(result, Value::Null);

        let events = channel.flush(|_, _| {});
        assert_eq!(events.len(), 1);
        assert!(events[0].is(FILE_SYSTEM_HANDLER, ERROR_OCCURRED));
        let message = events[0].payload["message"].as_str().unwrap();
        assert!(!message.is_empty());
        assert!(dir.path().join("nonempty").join("keep.txt").exists());
    }

    #[tokio::test]
    async fn success_events_carry_the_relative_path() {
        let dir = TempDir::new().unwrap();
        let channel = channel_in(&dir);

        call(&channel, "createDirectory", &["a/b"]).await;
        call(&channel, "writeFile", &["a/b/c.txt", "v1"]).await;
        call(&channel, "changeFileContent", &["a/b/c.txt", "v2"]).await;
        call(&channel, "deleteFile", &["a/b/c.txt"]).await;
        call(&channel, "deleteDirectory", &["a/b"]).await;

        let events = channel.flush(|_, _| {});
        let names: Vec<&str> = events.iter().map(|e| e.event.as_str()).collect();
        assert_eq!(
            names,
            vec![
                DIRECTORY_CREATED,
                FILE_CHANGED,
                FILE_CHANGED,
                FILE_DELETED,
                DIRECTORY_DELETED
            ]
        );
        assert_eq!(events[1].payload, json!({"path": "a/b/c.txt"}));
        assert!(!dir.path().join("a").join("b").exists());
        assert!(dir.path().join("a").exists());
    }

    #[tokio::test]
    async fn write_replaces_content() {
        let dir = TempDir::new().unwrap();
        let channel = channel_in(&dir);

        call(&channel, "createFile", &["f.txt", "first"]).await;
        call(&channel, "writeFile", &["f.txt", "second"]).await;
        assert_eq!(
            std::fs::read_to_string(dir.path().join("f.txt")).unwrap(),
            "second"
        );
    }

    #[tokio::test]
    async fn create_directory_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let channel = channel_in(&dir);

        call(&channel, "createDirectory", &["docs"]).await;
        call(&channel, "createDirectory", &["docs"]).await;
        let events = channel.flush(|_, _| {});
        assert!(events.iter().all(|e| e.event == DIRECTORY_CREATED));
    }

    #[tokio::test]
    async fn reading_missing_file_emits_error() {
        let dir = TempDir::new().unwrap();
        let channel = channel_in(&dir);

        call(&channel, "readFile", &["missing.txt"]).await;
        let events = channel.flush(|_, _| {});
        assert!(events[0].is(FILE_SYSTEM_HANDLER, ERROR_OCCURRED));
    }

    #[tokio::test]
    async fn traversal_outside_base_is_refused() {
        let dir = TempDir::new().unwrap();
        let channel = channel_in(&dir);

        call(&channel, "createFile", &["../escape.txt", "nope"]).await;
        let events = channel.flush(|_, _| {});
        assert!(events[0].is(FILE_SYSTEM_HANDLER, ERROR_OCCURRED));
        assert!(!dir.path().parent().unwrap().join("escape.txt").exists());
    }

    #[tokio::test]
    async fn unconfined_capability_joins_paths_as_given() {
        let outer = TempDir::new().unwrap();
        let base = outer.path().join("base");
        std::fs::create_dir(&base).unwrap();
        let fs = FileSystemCapability::new(&base).with_confinement(false);

        let payload = fs
            .run(FsMethod::CreateFile, "../outside.txt", Some("ok"))
            .await
            .unwrap();
        assert_eq!(payload, json!({"path": "../outside.txt"}));
        assert!(outer.path().join("outside.txt").exists());
    }

    #[tokio::test]
    async fn missing_arguments_are_bridge_errors() {
        let dir = TempDir::new().unwrap();
        let channel = channel_in(&dir);

        let err = channel
            .invoke(FILE_SYSTEM_HANDLER, "createFile", vec![json!("only-path.txt")])
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::InvalidArguments { .. }));
        assert_eq!(channel.pending(), 0);
    }

    #[test]
    fn method_names_map_to_operations() {
        assert_eq!("readFile".parse::<FsMethod>(), Ok(FsMethod::ReadFile));
        assert_eq!("changeFileContent".parse::<FsMethod>(), Ok(FsMethod::WriteFile));
        assert!("format".parse::<FsMethod>().is_err());
        for name in METHODS {
            assert!(name.parse::<FsMethod>().is_ok(), "{name} should parse");
        }
    }
}
