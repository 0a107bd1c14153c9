use std::path::{Component, Path, PathBuf};

/// Join `relative` onto `base`, refusing anything that would land outside it.
///
/// Resolution is lexical: `.` is skipped and `..` pops a previously pushed
/// component. Absolute paths and `..` past the base are errors, as is a path
/// that names the base itself. Symlinks are not followed.
pub fn resolve_within(base: &Path, relative: &str) -> Result<PathBuf, String> {
    let mut parts: Vec<&std::ffi::OsStr> = Vec::new();

    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => parts.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if parts.pop().is_none() {
                    return Err(format!("path escapes base directory: {relative}"));
                }
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(format!("absolute paths are not allowed: {relative}"));
            }
        }
    }

    if parts.is_empty() {
        return Err(format!("path does not name an entry: {relative:?}"));
    }

    let mut full = base.to_path_buf();
    full.extend(parts);
    Ok(full)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> PathBuf {
        PathBuf::from("/home/user")
    }

    #[test]
    fn plain_relative_path_is_joined() {
        assert_eq!(
            resolve_within(&base(), "docs/notes.txt").unwrap(),
            base().join("docs").join("notes.txt")
        );
    }

    #[test]
    fn dot_segments_are_normalized() {
        assert_eq!(
            resolve_within(&base(), "./docs/../notes.txt").unwrap(),
            base().join("notes.txt")
        );
    }

    #[test]
    fn escaping_the_base_fails() {
        assert!(resolve_within(&base(), "../etc/passwd").is_err());
        assert!(resolve_within(&base(), "docs/../../x").is_err());
    }

    #[test]
    fn absolute_paths_fail() {
        let err = resolve_within(&base(), "/etc/passwd").unwrap_err();
        assert!(err.contains("absolute"));
    }

    #[test]
    fn empty_and_self_references_fail() {
        assert!(resolve_within(&base(), "").is_err());
        assert!(resolve_within(&base(), ".").is_err());
        assert!(resolve_within(&base(), "docs/..").is_err());
    }
}
