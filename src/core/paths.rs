//! Path helpers
//!
//! Base-name extraction for reporting and the directory that holds a file's temp copy.

use std::path::Path;

/// Prefix of the randomly named temp file written before the atomic rename
pub const TEMP_PREFIX: &str = ".fixperms-";

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Base name of a path as reported in "Fixed" lines
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| normalize_path(path))
}

/// Directory containing `path`; a bare file name lives in "."
pub fn parent_dir(path: &Path) -> &Path {
    path.parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}
