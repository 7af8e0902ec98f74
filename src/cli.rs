//! CLI module - Command-line interface definitions and handlers

use anyhow::{bail, Result};
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::core::config::{load_file_config, Overrides, RewriteConfig};
use crate::core::file_reader::EncodingStrategy;
use crate::core::render::{RenderConfig, Reporter};

/// fixperms - recreate every file under a set of directory trees.
#[derive(Parser, Debug)]
#[command(name = "fixperms")]
#[command(
    author,
    version,
    about,
    long_about = r#"fixperms walks each ROOT depth-first and recreates every regular file it finds,
so each file picks up the metadata of a freshly created file. Contents are kept.

Directories named node_modules, .git, bin, obj, .vs, dist or .vscode are never
entered (see --exclude and --no-default-excludes). Roots that do not exist are
skipped silently. No permission bits are read or set.

Each file is written to a hidden, randomly named temp file and renamed over the
original, so a failed write never loses the file.

Output (one line per event):
    Processing <root>
    Fixed <file name>
    Error processing <path>: <error>

Examples:
    fixperms ./backend ./frontend
    fixperms --exclude target,.idea --dry-run .
    fixperms --config fixperms.json --summary --strict
"#
)]
pub struct Cli {
    /// Root directories to process, in order.
    #[arg(
        value_name = "ROOT",
        num_args = 0..,
        long_help = "Root directories to process, in order.\n\n\
Roots from --config come first. If no root is given anywhere, the current\n\
directory is used."
    )]
    pub roots: Vec<PathBuf>,

    /// Additional directory names to exclude (comma-separated, repeatable).
    #[arg(
        long,
        value_name = "NAMES",
        value_delimiter = ',',
        long_help = "Directory base names that are never entered, in addition to the defaults.\n\n\
Names are literal and case-sensitive. Example: --exclude target,.idea"
    )]
    pub exclude: Vec<String>,

    /// Do not exclude node_modules, .git, bin, obj, .vs, dist, .vscode.
    #[arg(long)]
    pub no_default_excludes: bool,

    /// JSON config file.
    #[arg(
        long,
        env = "FIXPERMS_CONFIG",
        value_name = "FILE",
        long_help = "JSON config file with optional fields: roots, excluded_names,\n\
use_default_excludes, encoding, verify.\n\n\
CLI roots are appended after the file's roots; CLI excludes are added."
    )]
    pub config: Option<PathBuf>,

    /// How to treat files that are not valid UTF-8 (lossy/skip/bytes).
    #[arg(
        long,
        value_parser = ["lossy", "skip", "bytes"],
        value_name = "STRATEGY",
        long_help = "How to treat files that are not valid UTF-8.\n\n\
Supported values:\n\
- lossy (default): invalid byte sequences are dropped\n\
- skip: the file is left untouched and reported as skipped\n\
- bytes: raw bytes are written back unchanged"
    )]
    pub encoding: Option<String>,

    /// Report what would be rewritten without touching anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Re-read every rewritten file and compare content hashes.
    #[arg(long)]
    pub verify: bool,

    /// Output format (text/jsonl).
    #[arg(long, default_value = "text", value_parser = ["text", "jsonl"], value_name = "FORMAT")]
    pub format: String,

    /// Print a final summary line.
    #[arg(long)]
    pub summary: bool,

    /// Exit with status 1 if any file failed.
    #[arg(long)]
    pub strict: bool,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,

    /// Quiet mode (only errors on stderr).
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug diagnostics on stderr).
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            roots: self.roots.clone(),
            excludes: self.exclude.clone(),
            no_default_excludes: self.no_default_excludes,
            encoding: self
                .encoding
                .as_deref()
                .and_then(|s| s.parse::<EncodingStrategy>().ok()),
            dry_run: self.dry_run,
            verify: self.verify,
        }
    }

    fn render_config(&self) -> RenderConfig {
        RenderConfig {
            format: self.format.parse().unwrap_or_default(),
            color: !self.no_color && std::io::stdout().is_terminal(),
            summary: self.summary,
        }
    }
}

/// Set up stderr diagnostics; RUST_LOG wins over -q/-v
pub fn init_tracing(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let file_config = cli.config.as_deref().map(load_file_config).transpose()?;
    let config = RewriteConfig::resolve(file_config, cli.overrides());
    tracing::debug!(?config, "resolved configuration");

    let stdout = std::io::stdout();
    let mut reporter = Reporter::new(cli.render_config(), stdout.lock());

    crate::rewrite::runner::run(&config, &mut reporter)?;
    let summary = reporter.finish()?;

    if cli.strict && summary.has_errors() {
        bail!("run finished with errors: {}", summary.errors);
    }

    Ok(())
}
