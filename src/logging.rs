use anyhow::{Context, Result};
use camino::Utf8Path;
use std::fs;
use std::io::IsTerminal;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Console filter directive for a run.
///
/// Stdout belongs to the linter, so the console layer writes to stderr and stays at
/// `warn` unless debugging.
pub fn console_level(debug_mode: bool) -> &'static str {
    if debug_mode { "debug" } else { "warn" }
}

/// ANSI colors only when stderr is a terminal
pub fn console_ansi() -> bool {
    std::io::stderr().is_terminal()
}

/// Create the log directory if it doesn't exist.
pub fn ensure_log_dir(log_dir: &Utf8Path) -> Result<()> {
    if !log_dir.exists() {
        fs::create_dir_all(log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir))?;
    }
    Ok(())
}

/// Setup logging on stderr with an optional rotating file appender.
///
/// # Arguments
/// * `log_dir` - Directory for daily-rotated log files, or `None` for console only
/// * `log_prefix` - Prefix for log files (e.g., "lintgate")
/// * `debug_mode` - If true, use debug level on the console; otherwise warn
///
/// # Returns
/// A guard that must be held for the duration of the program to keep file logging active
pub fn setup_logging(
    log_dir: Option<&Utf8Path>,
    log_prefix: &str,
    debug_mode: bool,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(console_ansi())
        .with_target(false)
        .with_filter(EnvFilter::new(console_level(debug_mode)));

    let Some(log_dir) = log_dir else {
        tracing_subscriber::registry()
            .with(console_layer)
            .try_init()
            .context("Failed to initialize logging")?;
        return Ok(None);
    };

    ensure_log_dir(log_dir)?;

    // Create daily rotating file appender
    let file_appender = rolling::daily(log_dir, log_prefix);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_filter = if debug_mode {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false) // No ANSI codes in log files
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(file_filter);

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    tracing::info!(
        "Logging initialized: dir={}, prefix={}, debug={}",
        log_dir,
        log_prefix,
        debug_mode
    );

    Ok(Some(guard))
}
