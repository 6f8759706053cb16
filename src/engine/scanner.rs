//! Concurrent scan pipeline.
//!
//! Locates candidate files on a blocking task, then classifies them on a
//! bounded pool of blocking tasks. Classification is independent per file,
//! so results are collected in completion order and sorted at the end.
//! The cancellation token is checked before each file is dispatched and
//! again inside each worker.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::error::{ClassifyError, Error, Result};
use crate::report::{FlaggedFile, ScanReport, SkippedFile};

use super::classifier::{Verdict, classify_file};
use super::locator::{LocatorOptions, locate, resolve_root};

/// Settings for a full scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Traversal settings.
    pub locator: LocatorOptions,
    /// Maximum number of files classified at once.
    pub jobs: NonZeroUsize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            locator: LocatorOptions::default(),
            jobs: default_jobs(),
        }
    }
}

/// Worker count used when none is configured.
pub fn default_jobs() -> NonZeroUsize {
    std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN)
}

type Outcome = std::result::Result<(PathBuf, Verdict), ClassifyError>;

/// Runs locate and classify over a project root.
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    options: ScanOptions,
    cancel: CancellationToken,
}

impl Scanner {
    /// Creates a scanner with its own cancellation token.
    pub fn new(options: ScanOptions) -> Self {
        Self {
            options,
            cancel: CancellationToken::new(),
        }
    }

    /// Uses an externally owned cancellation token.
    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Returns a handle that cancels this scanner's runs.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Scans `root` and returns a report with sorted results.
    ///
    /// Unreadable files are recorded in [`ScanReport::skipped`] and do not
    /// fail the run.
    ///
    /// # Errors
    ///
    /// - [`Error::Locate`] if traversal fails.
    /// - [`Error::Cancelled`] if the token is cancelled before completion.
    /// - [`Error::Task`] if a worker task panics.
    pub async fn scan(&self, root: &Path) -> Result<ScanReport> {
        let (root, files) = {
            let root = root.to_path_buf();
            let locator = self.options.locator.clone();
            tokio::task::spawn_blocking(move || {
                let root = resolve_root(&root)?;
                let files = locate(&root, &locator)?;
                Ok::<_, Error>((root, files))
            })
            .await
            .map_err(|e| Error::Task(e.to_string()))??
        };
        info!(root = %root.display(), jobs = self.options.jobs.get(), "scanning");

        let mut report = ScanReport {
            root,
            scanned: files.len(),
            ..ScanReport::default()
        };

        let permits = Arc::new(Semaphore::new(self.options.jobs.get()));
        let mut workers: JoinSet<Option<Outcome>> = JoinSet::new();

        for path in files {
            let permit = tokio::select! {
                () = self.cancel.cancelled() => return Err(Error::Cancelled),
                permit = Arc::clone(&permits).acquire_owned() => {
                    permit.map_err(|e| Error::Task(e.to_string()))?
                }
            };
            let cancel = self.cancel.clone();
            workers.spawn_blocking(move || {
                let _permit = permit;
                if cancel.is_cancelled() {
                    return None;
                }
                Some(classify_file(&path))
            });
        }

        while let Some(joined) = workers.join_next().await {
            let Some(outcome) = joined.map_err(|e| Error::Task(e.to_string()))? else {
                continue;
            };
            match outcome {
                Ok((path, verdict)) => {
                    if let Verdict::NeedsDirective { signals } = verdict {
                        report.flagged.push(FlaggedFile { path, signals });
                    }
                }
                Err(err) => {
                    warn!(error = %err, "skipping file");
                    report.skipped.push(SkippedFile {
                        path: err.path().to_path_buf(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        if self.cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        report.sort();
        info!(
            scanned = report.scanned,
            flagged = report.flagged.len(),
            skipped = report.skipped.len(),
            "scan finished"
        );
        Ok(report)
    }
}
