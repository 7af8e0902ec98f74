//! Rewrite module - Recreate files across directory trees
//!
//! Provides:
//! - walk: depth-first traversal with excluded-name pruning
//! - file: per-file atomic rewrite
//! - runner: the pass over all roots

pub mod file;
pub mod runner;
pub mod walk;
