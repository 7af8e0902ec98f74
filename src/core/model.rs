//! Event model
//!
//! Every outcome of a pass is an `Event`; the renderer decides how it looks.

use serde::Serialize;

/// One reportable outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum Event {
    /// A root that exists and is about to be walked
    Processing { root: String },

    /// A file was recreated
    Fixed {
        path: String,
        name: String,
        #[serde(skip_serializing_if = "std::ops::Not::not")]
        lossy: bool,
    },

    /// A file would be recreated (dry run)
    #[serde(rename = "would_fix")]
    WouldFix { path: String, name: String },

    /// A file was deliberately left alone
    Skipped { path: String, reason: String },

    /// A file, root or traversal entry failed
    Error { path: String, message: String },

    /// Totals for the whole pass
    Summary(RunSummary),
}

/// Counters accumulated over a pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub roots: usize,
    pub fixed: usize,
    pub would_fix: usize,
    pub skipped: usize,
    pub errors: usize,
}

impl RunSummary {
    /// Fold an event into the counters
    pub fn record(&mut self, event: &Event) {
        match event {
            Event::Processing { .. } => self.roots += 1,
            Event::Fixed { .. } => self.fixed += 1,
            Event::WouldFix { .. } => self.would_fix += 1,
            Event::Skipped { .. } => self.skipped += 1,
            Event::Error { .. } => self.errors += 1,
            Event::Summary(_) => {}
        }
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }
}
