//! The rewrite pass over all roots

use std::io::Write;
use std::path::Path;

use crate::core::config::RewriteConfig;
use crate::core::error::RewriteError;
use crate::core::model::Event;
use crate::core::paths::{file_name, normalize_path};
use crate::core::render::Reporter;
use crate::rewrite::file::{rewrite_file, Outcome};
use crate::rewrite::walk::{walk_files, WalkItem};

/// Walk every root in order and recreate each eligible file.
///
/// Filesystem failures become `Error` events and never stop the pass; only a
/// failure to write to the reporter is returned.
pub fn run<W: Write>(config: &RewriteConfig, reporter: &mut Reporter<W>) -> std::io::Result<()> {
    for root in &config.roots {
        if !root.exists() {
            tracing::debug!(root = %root.display(), "root does not exist, skipping");
            continue;
        }

        if !root.is_dir() {
            report_error(reporter, root, &RewriteError::NotADirectory)?;
            continue;
        }

        reporter.emit(Event::Processing {
            root: normalize_path(root),
        })?;

        for item in walk_files(root, config) {
            match item {
                WalkItem::File(path) => process_file(reporter, &path, config)?,
                WalkItem::Failed { path, error } => report_error(reporter, &path, &error)?,
            }
        }
    }

    Ok(())
}

fn process_file<W: Write>(
    reporter: &mut Reporter<W>,
    path: &Path,
    config: &RewriteConfig,
) -> std::io::Result<()> {
    let event = match rewrite_file(path, config) {
        Ok(Outcome::Fixed { lossy }) => Event::Fixed {
            path: normalize_path(path),
            name: file_name(path),
            lossy,
        },
        Ok(Outcome::WouldFix) => Event::WouldFix {
            path: normalize_path(path),
            name: file_name(path),
        },
        Ok(Outcome::Skipped { reason }) => Event::Skipped {
            path: normalize_path(path),
            reason,
        },
        Err(err) => {
            return report_error(reporter, path, &err);
        }
    };
    reporter.emit(event)
}

fn report_error<W: Write>(
    reporter: &mut Reporter<W>,
    path: &Path,
    error: &RewriteError,
) -> std::io::Result<()> {
    tracing::debug!(path = %path.display(), error = ?error, "entry failed");
    reporter.emit(Event::Error {
        path: normalize_path(path),
        message: error.to_string(),
    })
}
