//! File locator.
//!
//! Walks a project root depth-first and yields every file with a recognized
//! extension. Any entry whose name is in the exclusion set is skipped
//! together with its whole subtree. Paths come back in directory-listing
//! order; callers that need a stable order must sort.

use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::LocateError;

/// Directory names that are never descended into by default.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &["node_modules", ".next", ".git", "dist"];

/// File extensions that are considered component sources by default.
pub const DEFAULT_EXTENSIONS: &[&str] = &["ts", "tsx"];

/// Traversal settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorOptions {
    /// Entry names that are skipped along with their subtrees.
    pub exclude: BTreeSet<String>,
    /// Recognized extensions, without the leading dot.
    pub extensions: Vec<String>,
    /// Follow symbolic links. Link loops are skipped with a warning.
    pub follow_links: bool,
    /// Skip unreadable subdirectories instead of failing the whole walk.
    pub skip_unreadable_dirs: bool,
}

impl Default for LocatorOptions {
    fn default() -> Self {
        Self {
            exclude: DEFAULT_EXCLUDED_DIRS.iter().map(ToString::to_string).collect(),
            extensions: DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect(),
            follow_links: true,
            skip_unreadable_dirs: false,
        }
    }
}

impl LocatorOptions {
    fn is_excluded(&self, name: &std::ffi::OsStr) -> bool {
        name.to_str().is_some_and(|name| self.exclude.contains(name))
    }

    fn has_source_extension(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            return false;
        };
        self.extensions.iter().any(|ext| {
            name.strip_suffix(ext.as_str())
                .is_some_and(|rest| rest.ends_with('.'))
        })
    }
}

/// Checks that `root` is a listable directory and returns its canonical path.
///
/// # Errors
///
/// Returns [`LocateError::RootNotFound`] or [`LocateError::RootUnreadable`].
pub fn resolve_root(root: &Path) -> Result<PathBuf, LocateError> {
    let metadata = std::fs::metadata(root).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            LocateError::RootNotFound(root.to_path_buf())
        } else {
            LocateError::RootUnreadable {
                path: root.to_path_buf(),
                source,
            }
        }
    })?;
    if !metadata.is_dir() {
        return Err(LocateError::RootUnreadable {
            path: root.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
        });
    }
    root.canonicalize().map_err(|source| LocateError::RootUnreadable {
        path: root.to_path_buf(),
        source,
    })
}

/// Enumerates candidate source files under `root`.
///
/// Returned paths are absolute and start with the canonical root.
///
/// # Errors
///
/// - [`LocateError::RootNotFound`] if `root` does not exist.
/// - [`LocateError::RootUnreadable`] if `root` is not a listable directory.
/// - [`LocateError::SubdirectoryUnreadable`] if a directory below the root
///   cannot be listed and `skip_unreadable_dirs` is off.
pub fn locate(root: &Path, options: &LocatorOptions) -> Result<Vec<PathBuf>, LocateError> {
    let root = resolve_root(root)?;
    let mut files = Vec::new();

    let walker = WalkDir::new(&root)
        .follow_links(options.follow_links)
        .into_iter()
        // The root itself is never matched against the exclusion set.
        .filter_entry(|entry| entry.depth() == 0 || !options.is_excluded(entry.file_name()));

    for result in walker {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                if let Some(ancestor) = err.loop_ancestor() {
                    let link = err.path().map(Path::to_path_buf).unwrap_or_default();
                    warn!(
                        path = %link.display(),
                        ancestor = %ancestor.display(),
                        "skipping symbolic link loop"
                    );
                    continue;
                }

                let depth = err.depth();
                let path = err.path().map_or_else(|| root.clone(), Path::to_path_buf);
                let source = err
                    .into_io_error()
                    .unwrap_or_else(|| io::Error::other("directory walk failed"));

                if depth == 0 {
                    return Err(LocateError::RootUnreadable { path, source });
                }
                if options.skip_unreadable_dirs {
                    warn!(path = %path.display(), error = %source, "skipping unreadable directory");
                    continue;
                }
                return Err(LocateError::SubdirectoryUnreadable { path, source });
            }
        };

        if entry.file_type().is_file() && options.has_source_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }

    debug!(root = %root.display(), count = files.len(), "located source files");
    Ok(files)
}
