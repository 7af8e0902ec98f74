//! Renderer module
//!
//! Writes events as plain progress lines or as JSON Lines.

use colored::Colorize;
use std::io::Write;

use crate::core::model::{Event, RunSummary};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Jsonl,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "jsonl" => Ok(OutputFormat::Jsonl),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub color: bool,
    pub summary: bool,
}

/// Streams events to a writer as they happen
pub struct Reporter<W: Write> {
    config: RenderConfig,
    writer: W,
    summary: RunSummary,
}

impl<W: Write> Reporter<W> {
    pub fn new(config: RenderConfig, writer: W) -> Self {
        Self {
            config,
            writer,
            summary: RunSummary::default(),
        }
    }

    /// Record and print one event
    pub fn emit(&mut self, event: Event) -> std::io::Result<()> {
        self.summary.record(&event);
        let line = self.render(&event);
        writeln!(self.writer, "{}", line)
    }

    /// Print the summary (when enabled) and hand back the counters
    pub fn finish(mut self) -> std::io::Result<RunSummary> {
        let summary = self.summary;
        if self.config.summary {
            let line = self.render(&Event::Summary(summary));
            writeln!(self.writer, "{}", line)?;
        }
        self.writer.flush()?;
        Ok(summary)
    }

    #[allow(dead_code)]
    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    fn render(&self, event: &Event) -> String {
        match self.config.format {
            OutputFormat::Text => self.render_text(event),
            OutputFormat::Jsonl => serde_json::to_string(event).unwrap_or_default(),
        }
    }

    fn render_text(&self, event: &Event) -> String {
        match event {
            Event::Processing { root } => format!("Processing {}", root),
            Event::Fixed { name, .. } => {
                let label = self.paint("Fixed", |s| s.green());
                format!("{} {}", label, name)
            }
            Event::WouldFix { name, .. } => format!("Would fix {}", name),
            Event::Skipped { path, reason } => {
                let label = self.paint("Skipped", |s| s.yellow());
                format!("{} {}: {}", label, path, reason)
            }
            Event::Error { path, message } => {
                let label = self.paint("Error processing", |s| s.red());
                format!("{} {}: {}", label, path, message)
            }
            Event::Summary(summary) if summary.would_fix > 0 => format!(
                "Summary: {} would fix, {} skipped, {} errors",
                summary.would_fix, summary.skipped, summary.errors
            ),
            Event::Summary(summary) => format!(
                "Summary: {} fixed, {} skipped, {} errors",
                summary.fixed, summary.skipped, summary.errors
            ),
        }
    }

    fn paint(&self, label: &str, style: impl Fn(&str) -> colored::ColoredString) -> String {
        if self.config.color {
            style(label).to_string()
        } else {
            label.to_string()
        }
    }
}
