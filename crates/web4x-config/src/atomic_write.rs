//! Crash-safe file replacement.
//!
//! Writes go to a `.tmp` sibling first and are renamed into place so a
//! crash mid-write never leaves a truncated file behind.

use std::path::Path;

/// Write `bytes` to `path` via a temporary file and rename.
///
/// Falls back to a direct write when the rename fails (Windows can refuse to
/// replace an open file).
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("failed to create directory {}: {e}", parent.display()))?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = std::path::PathBuf::from(tmp_name);

    std::fs::write(&tmp_path, bytes)
        .map_err(|e| format!("failed to write {}: {e}", tmp_path.display()))?;

    if let Err(e) = std::fs::rename(&tmp_path, path) {
        tracing::warn!("atomic rename failed ({}), falling back to direct write", e);
        std::fs::write(path, bytes)
            .map_err(|e2| format!("failed to write {}: {e2}", path.display()))?;
        let _ = std::fs::remove_file(&tmp_path);
    }
    Ok(())
}
