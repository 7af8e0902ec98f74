//! File reading for the rewrite pass
//!
//! Provides consistent handling for:
//! - Valid UTF-8 text (passed through)
//! - Non-UTF-8 content (dropped, skipped, or kept as raw bytes)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{Result, RewriteError};

/// Strategy for handling non-UTF-8 content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingStrategy {
    /// Decode as UTF-8, dropping invalid byte sequences
    #[default]
    Lossy,
    /// Leave non-UTF-8 files untouched
    Skip,
    /// Write the raw bytes back unchanged
    Bytes,
}

impl std::str::FromStr for EncodingStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lossy" => Ok(EncodingStrategy::Lossy),
            "skip" => Ok(EncodingStrategy::Skip),
            "bytes" | "raw" => Ok(EncodingStrategy::Bytes),
            _ => Err(format!("Unknown encoding strategy: {}", s)),
        }
    }
}

/// Content ready to be written back
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// Bytes to write, and whether decoding changed them
    Ready { bytes: Vec<u8>, lossy: bool },
    /// The file must not be rewritten
    Skipped { reason: String },
}

/// Read a file and decode it according to the strategy
pub fn read_for_rewrite(path: &Path, strategy: EncodingStrategy) -> Result<FileContent> {
    let bytes = fs::read(path).map_err(RewriteError::Read)?;
    Ok(decode(bytes, strategy))
}

/// Apply an encoding strategy to raw file bytes
pub fn decode(bytes: Vec<u8>, strategy: EncodingStrategy) -> FileContent {
    if strategy == EncodingStrategy::Bytes {
        return FileContent::Ready {
            bytes,
            lossy: false,
        };
    }

    match String::from_utf8(bytes) {
        Ok(text) => FileContent::Ready {
            bytes: text.into_bytes(),
            lossy: false,
        },
        Err(err) => match strategy {
            EncodingStrategy::Skip => FileContent::Skipped {
                reason: format!(
                    "invalid UTF-8 at byte {}",
                    err.utf8_error().valid_up_to()
                ),
            },
            _ => FileContent::Ready {
                bytes: drop_invalid_utf8(err.as_bytes()).into_bytes(),
                lossy: true,
            },
        },
    }
}

/// Decode UTF-8, discarding every invalid sequence instead of replacing it
pub fn drop_invalid_utf8(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}
