//! Directory traversal with pruning
//!
//! Uses walkdir; excluded directories are cut in `filter_entry` so they are never read.

use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::core::config::RewriteConfig;
use crate::core::error::RewriteError;

/// What the walk yields to the runner
#[derive(Debug)]
pub enum WalkItem {
    /// A regular file eligible for rewriting
    File(PathBuf),
    /// A traversal failure for this path
    Failed { path: PathBuf, error: RewriteError },
}

/// Walk `root` depth-first in file-name order, yielding regular files only
pub fn walk_files<'a>(root: &Path, config: &'a RewriteConfig) -> impl Iterator<Item = WalkItem> + 'a {
    let fallback = root.to_path_buf();

    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |entry| !is_pruned(entry, config))
        .filter_map(move |entry| match entry {
            Ok(entry) => classify(entry),
            Err(err) => {
                let path = err.path().map(Path::to_path_buf).unwrap_or_else(|| fallback.clone());
                Some(WalkItem::Failed {
                    path,
                    error: RewriteError::Walk(err),
                })
            }
        })
}

/// Excluded directories below the root are pruned; the root itself never is
fn is_pruned(entry: &DirEntry, config: &RewriteConfig) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }

    let pruned = entry
        .file_name()
        .to_str()
        .map(|name| config.is_excluded(name))
        .unwrap_or(false);

    if pruned {
        tracing::debug!(path = %entry.path().display(), "pruned excluded directory");
    }
    pruned
}

fn classify(entry: DirEntry) -> Option<WalkItem> {
    let file_type = entry.file_type();

    if file_type.is_symlink() {
        tracing::debug!(path = %entry.path().display(), "skipping symlink");
        return None;
    }
    if !file_type.is_file() {
        return None;
    }

    Some(WalkItem::File(entry.into_path()))
}
