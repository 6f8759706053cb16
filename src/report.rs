//! Scan results and their renderings.
//!
//! A [`ScanReport`] is the only output of a run. The binary prints it as
//! plain text or JSON; other front ends can consume the flagged paths
//! directly.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::engine::signals::SignalMatch;

/// Message shown when no file needs the directive.
pub const ALL_CLEAR: &str = "All components are correctly configured.";

/// Header printed above the list of flagged files.
pub const MISSING_HEADER: &str = "Missing \"use client\" directives:";

/// A file that needs the directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlaggedFile {
    /// Absolute path of the file.
    pub path: PathBuf,
    /// Signals that caused the file to be flagged.
    pub signals: Vec<SignalMatch>,
}

/// A candidate file that could not be classified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    /// Path of the file.
    pub path: PathBuf,
    /// Why it was skipped.
    pub reason: String,
}

/// Aggregate result of one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    /// The project root that was scanned.
    pub root: PathBuf,
    /// Number of candidate files found by the locator.
    pub scanned: usize,
    /// Files needing the directive, sorted by path.
    pub flagged: Vec<FlaggedFile>,
    /// Files that could not be read, sorted by path.
    pub skipped: Vec<SkippedFile>,
}

impl ScanReport {
    /// Returns true when no file needs the directive.
    pub fn is_clean(&self) -> bool {
        self.flagged.is_empty()
    }

    /// Paths of the flagged files in report order.
    pub fn flagged_paths(&self) -> Vec<&Path> {
        self.flagged.iter().map(|f| f.path.as_path()).collect()
    }

    /// Sorts flagged and skipped entries by path.
    pub(crate) fn sort(&mut self) {
        self.flagged.sort_by(|a, b| a.path.cmp(&b.path));
        self.skipped.sort_by(|a, b| a.path.cmp(&b.path));
    }

    /// Renders the report for a terminal.
    ///
    /// With `with_signals`, every flagged path is followed by the signals
    /// that matched.
    pub fn render_text(&self, with_signals: bool) -> String {
        let mut out = String::new();
        if self.is_clean() {
            out.push_str(ALL_CLEAR);
            out.push('\n');
        } else {
            out.push_str(MISSING_HEADER);
            out.push('\n');
            for file in &self.flagged {
                let _ = writeln!(out, "  {}", file.path.display());
                if with_signals {
                    let signals: Vec<String> = file.signals.iter().map(ToString::to_string).collect();
                    let _ = writeln!(out, "    {}", signals.join(", "));
                }
            }
        }

        if !self.skipped.is_empty() {
            let _ = writeln!(out, "Skipped {} unreadable file(s):", self.skipped.len());
            for file in &self.skipped {
                let _ = writeln!(out, "  {}: {}", file.path.display(), file.reason);
            }
        }
        out
    }

    /// Renders the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
