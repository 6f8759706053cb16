//! use-client-scan - Entry Point
//!
//! Parses arguments, sets up logging, runs a scan and prints the report.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tokio_util::sync::CancellationToken;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use use_client_scan::config::{self, ScanConfig};
use use_client_scan::engine::Scanner;

/// Exit code when at least one file needs the directive.
const EXIT_FLAGGED: u8 = 1;
/// Exit code for fatal errors.
const EXIT_ERROR: u8 = 2;

/// Report files that need a "use client" directive.
#[derive(Parser, Debug)]
#[command(name = "use-client-scan")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Project root directory to scan.
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    /// Configuration file (default: <root>/.use-client-scan.json).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Extra directory names to exclude.
    #[arg(short, long)]
    exclude: Vec<String>,

    /// Number of files classified concurrently.
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Report format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// List the matched signals under each flagged file.
    #[arg(long)]
    verbose_signals: bool,

    /// Log level: trace, debug, info, warn, error.
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    /// Log format.
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default .use-client-scan.json into the project root.
    Init,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

impl Args {
    /// Parses the log level string into a tracing Level.
    fn parse_log_level(&self) -> Result<Level> {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            other => anyhow::bail!("invalid log level: {}", other),
        }
    }

    /// Loads the configuration and applies command-line overrides.
    fn scan_config(&self) -> Result<ScanConfig> {
        let mut config = match &self.config {
            Some(path) => ScanConfig::load(path)?,
            None => ScanConfig::load_for_root(&self.root)?,
        };
        config.add_excludes(self.exclude.iter().cloned());
        if self.jobs.is_some() {
            config.jobs = self.jobs;
        }
        Ok(config)
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing(level: Level, format: LogFormat) -> Result<()> {
    // Create an env filter that respects RUST_LOG but has a default level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("use_client_scan={level}")));

    // Logs go to stderr so stdout carries only the report
    let registry = tracing_subscriber::registry().with(filter);
    let result = match format {
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(false),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
    };
    result.context("failed to initialize tracing subscriber")?;

    Ok(())
}

async fn run(args: Args) -> Result<ExitCode> {
    if let Some(Command::Init) = args.command {
        let path = config::init(&args.root).context("failed to write configuration")?;
        println!("Created {}", path.display());
        return Ok(ExitCode::SUCCESS);
    }

    let config = args.scan_config().context("failed to load configuration")?;

    // Ctrl+C stops dispatching new files and aborts the run
    let cancel = CancellationToken::new();
    let cancel_on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel_on_signal.cancel();
        }
    });

    let scanner = Scanner::new(config.scan_options()).with_cancellation(cancel);
    let report = scanner
        .scan(&args.root)
        .await
        .with_context(|| format!("failed to scan {}", args.root.display()))?;

    match args.format {
        OutputFormat::Text => print!("{}", report.render_text(args.verbose_signals)),
        OutputFormat::Json => println!(
            "{}",
            report.render_json().context("failed to serialize report")?
        ),
    }

    info!(flagged = report.flagged.len(), "done");
    if report.is_clean() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_FLAGGED))
    }
}

/// Main entry point.
#[tokio::main]
async fn main() -> ExitCode {
    // Parse command-line arguments
    let args = Args::parse();

    let setup = args
        .parse_log_level()
        .and_then(|level| init_tracing(level, args.log_format));
    if let Err(err) = setup {
        eprintln!("error: {err:#}");
        return ExitCode::from(EXIT_ERROR);
    }

    match run(args).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
