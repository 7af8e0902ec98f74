//! fixperms - recreate every file under a set of directory trees
//!
//! fixperms provides:
//! - Depth-first traversal that prunes dependency/build/VCS directories
//! - Atomic per-file rewrite (temp file + rename)
//! - Line-oriented progress output (text or jsonl)

use anyhow::Result;
use clap::Parser;

mod cli;
mod core;
mod rewrite;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_tracing(&cli);
    cli::run(cli)
}
