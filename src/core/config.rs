//! Rewrite configuration
//!
//! Roots and excluded names are carried explicitly so the runner never reads
//! global state. A JSON file can provide the same options as the CLI.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{Result, RewriteError};
use crate::core::file_reader::EncodingStrategy;

/// Directory names pruned from every walk unless defaults are disabled
pub const DEFAULT_EXCLUDED_NAMES: &[&str] = &[
    "node_modules",
    ".git",
    "bin",
    "obj",
    ".vs",
    "dist",
    ".vscode",
];

/// Everything the runner needs to know about a pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteConfig {
    /// Roots, processed in order
    pub roots: Vec<PathBuf>,

    /// Literal directory base names that are never entered
    pub excluded_names: BTreeSet<String>,

    /// How non-UTF-8 content is handled
    pub encoding: EncodingStrategy,

    /// Report only, change nothing
    pub dry_run: bool,

    /// Re-read and hash-compare every rewritten file
    pub verify: bool,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            excluded_names: default_excluded_names(),
            encoding: EncodingStrategy::default(),
            dry_run: false,
            verify: false,
        }
    }
}

impl RewriteConfig {
    #[allow(dead_code)]
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            ..Default::default()
        }
    }

    #[allow(dead_code)]
    pub fn with_excluded<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded_names.contains(name)
    }

    /// Build a config from an optional file, then layer CLI options on top
    pub fn resolve(file: Option<FileConfig>, overrides: Overrides) -> Self {
        let file = file.unwrap_or_default();

        let mut excluded_names = if file.use_default_excludes && !overrides.no_default_excludes {
            default_excluded_names()
        } else {
            BTreeSet::new()
        };
        excluded_names.extend(file.excluded_names);
        excluded_names.extend(overrides.excludes);

        let mut roots = file.roots;
        roots.extend(overrides.roots);
        if roots.is_empty() {
            roots.push(PathBuf::from("."));
        }

        Self {
            roots,
            excluded_names,
            encoding: overrides.encoding.unwrap_or(file.encoding),
            dry_run: overrides.dry_run,
            verify: overrides.verify || file.verify,
        }
    }
}

/// On-disk configuration (all fields optional)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub roots: Vec<PathBuf>,
    pub excluded_names: Vec<String>,
    pub use_default_excludes: bool,
    pub encoding: EncodingStrategy,
    pub verify: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            excluded_names: Vec::new(),
            use_default_excludes: true,
            encoding: EncodingStrategy::default(),
            verify: false,
        }
    }
}

/// Options coming from the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub roots: Vec<PathBuf>,
    pub excludes: Vec<String>,
    pub no_default_excludes: bool,
    pub encoding: Option<EncodingStrategy>,
    pub dry_run: bool,
    pub verify: bool,
}

/// Load a JSON config file
pub fn load_file_config(path: &Path) -> anyhow::Result<FileConfig> {
    use anyhow::Context;

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    Ok(parse_file_config(path, &content)?)
}

fn parse_file_config(path: &Path, content: &str) -> Result<FileConfig> {
    serde_json::from_str(content).map_err(|source| RewriteError::Config {
        path: path.to_path_buf(),
        source,
    })
}

fn default_excluded_names() -> BTreeSet<String> {
    DEFAULT_EXCLUDED_NAMES.iter().map(|s| s.to_string()).collect()
}
