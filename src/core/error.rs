//! Error taxonomy for the rewrite pass
//!
//! Every variant except `Config` is reported per entry and swallowed by the runner.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RewriteError {
    #[error("not a directory")]
    NotADirectory,

    #[error("read failed: {0}")]
    Read(#[source] std::io::Error),

    #[error("write to {path} failed: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("replace failed: {0}")]
    Replace(#[source] std::io::Error),

    #[error("verification failed: expected {expected}, found {actual}")]
    Verify { expected: String, actual: String },

    #[error("{0}")]
    Walk(#[from] walkdir::Error),

    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, RewriteError>;
