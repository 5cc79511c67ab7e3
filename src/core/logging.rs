//! Logging Module
//!
//! Sets up `tracing` with a daily rolling JSON log file in the data
//! directory, bridges `log` macros into it, and installs the miette report
//! handler.
//!
//! The TUI writes to the file only, since the terminal is in raw mode. CLI
//! runs also print warnings and errors to stderr.

use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub const LOG_FILE_NAME: &str = "mx-error-guide.log";

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_FILE_FILTER: &str = "info";
const DEFAULT_STDERR_FILTER: &str = "warn";

/// Directory holding the rolling log files.
pub fn log_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("logs")
}

fn env_filter_or(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

fn file_writer(data_dir: &Path) -> (NonBlocking, WorkerGuard) {
    let dir = log_dir(data_dir);
    if let Err(e) = fs::create_dir_all(&dir) {
        eprintln!("Failed to create logs directory {}: {}", dir.display(), e);
    }
    let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_NAME);
    tracing_appender::non_blocking(appender)
}

/// Initialize logging for TUI mode: JSON file layer only.
///
/// Keep the returned guard alive until shutdown so buffered lines are flushed.
pub fn init_tui(data_dir: &Path) -> WorkerGuard {
    let (writer, guard) = file_writer(data_dir);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_filter(env_filter_or(DEFAULT_FILE_FILTER));

    // No stderr layer: the TUI owns the terminal
    if tracing_subscriber::registry()
        .with(file_layer)
        .try_init()
        .is_err()
    {
        return guard;
    }

    finish_init(data_dir);
    guard
}

/// Initialize logging for one-shot CLI commands: JSON file plus compact stderr.
pub fn init_cli(data_dir: &Path) -> WorkerGuard {
    let (writer, guard) = file_writer(data_dir);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_filter(env_filter_or(DEFAULT_FILE_FILTER));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .compact()
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .with_filter(env_filter_or(DEFAULT_STDERR_FILTER));

    if tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .is_err()
    {
        return guard;
    }

    finish_init(data_dir);
    guard
}

fn finish_init(data_dir: &Path) {
    // Already installed when tracing-subscriber's log bridge is enabled.
    let _ = tracing_log::LogTracer::init();

    init_miette();

    log::info!(
        "Logging initialized. Writing to: {:?} (daily rolling)",
        log_dir(data_dir).join(LOG_FILE_NAME)
    );
}

/// Install miette's graphical report handler for top-level errors.
pub fn init_miette() {
    let color = io::stderr().is_terminal();

    miette::set_hook(Box::new(move |_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(color)
                .unicode(color)
                .context_lines(3)
                .tab_width(4)
                .break_words(true)
                .color(color)
                .build(),
        )
    }))
    .ok(); // Ignore if already set
}
