//! Project configuration.
//!
//! Settings live in an optional `.use-client-scan.json` at the project
//! root. A missing file means defaults; unknown fields are rejected.

use std::collections::BTreeSet;
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::locator::{DEFAULT_EXCLUDED_DIRS, DEFAULT_EXTENSIONS, LocatorOptions};
use crate::engine::scanner::{ScanOptions, default_jobs};
use crate::error::ConfigError;

/// File name looked up in the project root.
pub const CONFIG_FILE_NAME: &str = ".use-client-scan.json";

/// Contents of the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Entry names never descended into. Replaces the default set.
    pub exclude: Vec<String>,
    /// Recognized file extensions, without the leading dot.
    pub extensions: Vec<String>,
    /// Follow symbolic links while walking.
    pub follow_links: bool,
    /// Skip unreadable subdirectories instead of aborting.
    pub skip_unreadable_dirs: bool,
    /// Classification workers. Defaults to the available parallelism.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jobs: Option<usize>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            exclude: DEFAULT_EXCLUDED_DIRS.iter().map(ToString::to_string).collect(),
            extensions: DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect(),
            follow_links: true,
            skip_unreadable_dirs: false,
            jobs: None,
        }
    }
}

impl ScanConfig {
    /// Loads configuration from an explicit file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Loads `<root>/.use-client-scan.json`, or defaults if it is absent.
    ///
    /// # Errors
    ///
    /// Same as [`ScanConfig::load`] when the file exists.
    pub fn load_for_root(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Adds extra excluded names on top of the configured ones.
    pub fn add_excludes<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            if !self.exclude.contains(&name) {
                self.exclude.push(name);
            }
        }
    }

    /// Traversal settings derived from this configuration.
    pub fn locator_options(&self) -> LocatorOptions {
        LocatorOptions {
            exclude: self.exclude.iter().cloned().collect::<BTreeSet<_>>(),
            extensions: self
                .extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_string())
                .collect(),
            follow_links: self.follow_links,
            skip_unreadable_dirs: self.skip_unreadable_dirs,
        }
    }

    /// Full scan settings derived from this configuration.
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            locator: self.locator_options(),
            jobs: self
                .jobs
                .and_then(NonZeroUsize::new)
                .unwrap_or_else(default_jobs),
        }
    }
}

/// Writes the default configuration to `<root>/.use-client-scan.json`.
///
/// The file is written to a temporary sibling first and then renamed into
/// place. Returns the path of the new file.
///
/// # Errors
///
/// Returns [`ConfigError::AlreadyExists`] if the file is already there,
/// or [`ConfigError::Write`] if writing fails.
pub fn init(root: &Path) -> Result<PathBuf, ConfigError> {
    let config_file = root.join(CONFIG_FILE_NAME);
    if config_file.exists() {
        return Err(ConfigError::AlreadyExists(config_file));
    }

    let write_error = |source: std::io::Error| ConfigError::Write {
        path: config_file.clone(),
        source,
    };

    let mut json = serde_json::to_string_pretty(&ScanConfig::default())
        .map_err(|e| write_error(std::io::Error::other(e)))?;
    json.push('\n');

    let temp_file = config_file.with_extension("json.tmp");
    fs::write(&temp_file, json).map_err(write_error)?;
    fs::rename(&temp_file, &config_file).map_err(write_error)?;

    Ok(config_file)
}
