//! Error types for use-client-scan.
//!
//! This module defines all error types used throughout the crate,
//! organized by subsystem: traversal, classification, and configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while enumerating candidate files under a project root.
///
/// Every variant is fatal for the run that produced it.
#[derive(Debug, Error)]
pub enum LocateError {
    /// The project root does not exist.
    #[error("project root not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// The project root exists but cannot be listed.
    #[error("project root is unreadable: {}: {source}", path.display())]
    RootUnreadable {
        /// The root that could not be listed.
        path: PathBuf,
        /// The underlying filesystem error.
        source: std::io::Error,
    },

    /// A directory below the root could not be listed mid-traversal.
    #[error("directory is unreadable: {}: {source}", path.display())]
    SubdirectoryUnreadable {
        /// The directory that could not be listed.
        path: PathBuf,
        /// The underlying filesystem error.
        source: std::io::Error,
    },
}

/// Errors raised while reading a single candidate file.
///
/// These never abort a scan; the file is left out of the results.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// The file disappeared or could not be read.
    #[error("failed to read {}: {source}", path.display())]
    FileRead {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying filesystem error.
        source: std::io::Error,
    },

    /// The file content is not valid UTF-8 text.
    #[error("file is not valid UTF-8 text: {}", path.display())]
    Encoding {
        /// The offending file.
        path: PathBuf,
    },
}

impl ClassifyError {
    /// Returns the path of the file that failed.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::FileRead { path, .. } | Self::Encoding { path } => path,
        }
    }
}

/// Errors related to the project configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file exists but could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        /// The configuration file.
        path: PathBuf,
        /// The underlying filesystem error.
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON or has unknown fields.
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        /// The configuration file.
        path: PathBuf,
        /// The JSON error.
        source: serde_json::Error,
    },

    /// `init` was asked to create a file that already exists.
    #[error("config already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// Writing the configuration file failed.
    #[error("failed to write config {}: {source}", path.display())]
    Write {
        /// The configuration file.
        path: PathBuf,
        /// The underlying filesystem error.
        source: std::io::Error,
    },
}

/// A unified error type for the entire crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Traversal error.
    #[error(transparent)]
    Locate(#[from] LocateError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The scan was cancelled before it completed.
    #[error("scan cancelled")]
    Cancelled,

    /// A worker task failed to complete.
    #[error("worker task failed: {0}")]
    Task(String),

    /// Generic IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for use-client-scan operations.
pub type Result<T> = std::result::Result<T, Error>;
