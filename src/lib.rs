//! use-client-scan
//!
//! Finds React/Next.js component files that use client-only APIs (hooks,
//! browser globals, DOM event props, non-deterministic calls) but do not
//! declare the `"use client"` directive.
//!
//! # Overview
//!
//! This library provides:
//! - a file locator that walks a project and skips dependency and build
//!   directories
//! - a directive classifier built on lexical heuristics, not a parser
//! - a concurrent scanner producing a sorted [`report::ScanReport`]
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   paths   ┌──────────────┐  verdicts  ┌──────────────┐
//! │   Locator    │──────────►│  Classifier  │───────────►│  ScanReport  │
//! │  (walkdir)   │           │ (per file)   │            │ (text/json)  │
//! └──────────────┘           └──────────────┘            └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`error`] - Error types for the entire crate
//! - [`engine`] - Locator, classifier and scanner
//! - [`config`] - Project configuration file
//! - [`report`] - Scan results and renderings
//!
//! # Example
//!
//! ```ignore
//! use use_client_scan::engine::{ScanOptions, Scanner};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let report = Scanner::new(ScanOptions::default())
//!         .scan(std::path::Path::new("."))
//!         .await?;
//!     print!("{}", report.render_text(false));
//!     Ok(())
//! }
//! ```

// Enforce documentation and other quality attributes
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are too strict
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod config;
pub mod engine;
pub mod error;
pub mod report;

// Re-export commonly used types at the crate root
pub use error::{Error, Result};
