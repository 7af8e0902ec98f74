//! Per-file rewrite
//!
//! Content goes to a randomly named temp file in the same directory and is
//! renamed over the original only after it is fully written and synced, so a
//! failure never loses the file.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::core::config::RewriteConfig;
use crate::core::error::{Result, RewriteError};
use crate::core::file_reader::{read_for_rewrite, FileContent};
use crate::core::paths::{parent_dir, TEMP_PREFIX};
use crate::core::util::{hash_bytes, hash_file};

/// Outcome of a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Fixed { lossy: bool },
    WouldFix,
    Skipped { reason: String },
}

/// Recreate `path` with its (decoded) content
pub fn rewrite_file(path: &Path, config: &RewriteConfig) -> Result<Outcome> {
    let (bytes, lossy) = match read_for_rewrite(path, config.encoding)? {
        FileContent::Ready { bytes, lossy } => (bytes, lossy),
        FileContent::Skipped { reason } => return Ok(Outcome::Skipped { reason }),
    };

    if config.dry_run {
        return Ok(Outcome::WouldFix);
    }

    if lossy {
        tracing::warn!(path = %path.display(), "dropped undecodable bytes while rewriting");
    }

    replace_atomically(path, &bytes)?;

    if config.verify {
        verify(path, &bytes)?;
    }

    Ok(Outcome::Fixed { lossy })
}

fn replace_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = parent_dir(path);
    let write_err = |source: std::io::Error| RewriteError::Write {
        path: dir.to_path_buf(),
        source,
    };

    let mut temp = temp_builder().tempfile_in(dir).map_err(write_err)?;
    temp.write_all(bytes).map_err(write_err)?;
    temp.as_file().sync_all().map_err(write_err)?;

    // on failure the temp file is removed when the error drops it
    temp.persist(path)
        .map_err(|err| RewriteError::Replace(err.error))?;
    sync_dir(dir);
    Ok(())
}

/// Random, exclusive temp names; the file gets the mode a plain create would
fn temp_builder() -> tempfile::Builder<'static, 'static> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(TEMP_PREFIX);
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    builder
}

#[cfg(unix)]
fn sync_dir(dir: &Path) {
    if let Err(err) = File::open(dir).and_then(|handle| handle.sync_all()) {
        tracing::warn!(path = %dir.display(), error = %err, "failed to sync directory");
    }
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) {}

fn verify(path: &Path, written: &[u8]) -> Result<()> {
    let expected = hash_bytes(written);
    let actual = hash_file(path).map_err(RewriteError::Read)?;
    if expected != actual {
        return Err(RewriteError::Verify { expected, actual });
    }
    tracing::debug!(path = %path.display(), hash = %actual, "verified");
    Ok(())
}
