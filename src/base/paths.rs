//! Path handling for import resolution.
//!
//! Import paths are written with Windows separators in most MSBuild files.
//! They are normalized for the host and resolved lexically (no symlink
//! resolution) so that cache keys are stable whether or not the file exists.

use std::path::{Component, Path, PathBuf};

/// Convert separators for the host and collapse `.` / `..` components.
pub fn normalize_path(path: &str) -> PathBuf {
    let host = if cfg!(windows) {
        path.to_string()
    } else {
        path.replace('\\', "/")
    };

    let mut normalized = PathBuf::new();
    for component in Path::new(&host).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Resolve `path` against `base_dir` unless it is already absolute.
pub fn resolve_relative(base_dir: Option<&Path>, path: &str) -> PathBuf {
    let normalized = normalize_path(path);
    match base_dir {
        Some(base) if normalized.is_relative() => {
            normalize_path(&base.join(normalized).to_string_lossy())
        }
        _ => normalized,
    }
}

/// By convention, names starting with an underscore are private to their file.
pub fn is_private_name(name: &str) -> bool {
    name.starts_with('_')
}
