//! Detection engine.
//!
//! The engine is a two-stage pipeline:
//!
//! ```text
//! project root ──► locator ──► candidate files ──► classifier ──► flagged paths
//! ```
//!
//! - `locator`: recursive walk with exclusion rules
//! - `classifier`: comment-aware directive detection and client signals
//! - `signals`: static token catalogs
//! - `scanner`: the same pipeline run concurrently, with cancellation
//!
//! # Usage
//!
//! ```ignore
//! use use_client_scan::engine::{self, LocatorOptions};
//!
//! let flagged = engine::find_missing_directives(root, &LocatorOptions::default())?;
//! ```

pub mod classifier;
pub mod locator;
pub mod scanner;
pub mod signals;

use std::path::{Path, PathBuf};

use tracing::warn;

pub use classifier::{Verdict, classify, classify_file, classify_source};
pub use locator::{LocatorOptions, locate};
pub use scanner::{ScanOptions, Scanner};

use crate::error::LocateError;

/// Sequential locate-then-classify over `root`.
///
/// Returns the sorted absolute paths of files that need the directive. An
/// empty list means every component is correctly configured. Files that
/// cannot be read are left out with a warning.
///
/// # Errors
///
/// Returns a [`LocateError`] if traversal fails.
pub fn find_missing_directives(
    root: &Path,
    options: &LocatorOptions,
) -> Result<Vec<PathBuf>, LocateError> {
    let mut flagged: Vec<PathBuf> = locate(root, options)?
        .iter()
        .filter_map(|path| match classify(path) {
            Ok(result) => result,
            Err(err) => {
                warn!(error = %err, "skipping file");
                None
            }
        })
        .collect();
    flagged.sort();
    Ok(flagged)
}
