//! Logging configuration with file-based output and size-based rotation.
//!
//! Writes logs to `~/.config/ding/ding.log` (or platform equivalent) with
//! 1 MB size-based rotation. Stdout belongs to the countdown readout, so
//! console output goes to stderr and only when `DEBUG_LOGGING=1` is set.

use rolling_file::{BasicRollingFileAppender, RollingConditionBasic};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const DEBUG_DIRECTIVE: &str = "info,ding=debug,ding_core=debug,ding_cli=debug";

/// Initialize logging.
///
/// Returns a `WorkerGuard` that MUST be held for the process lifetime so
/// buffered lines are flushed on exit.
///
/// # Behavior
/// - **File output:** INFO+ (DEBUG+ for ding crates with `DEBUG_LOGGING=1`)
/// - **Stderr output:** only with `DEBUG_LOGGING=1`
/// - **Rotation:** Size-based at 1 MB, keeps only the latest rotated file
///
/// # Fallback
/// If the log directory cannot be created, returns `None` and logs to stderr only.
pub fn init() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let debug_logging = std::env::var("DEBUG_LOGGING").is_ok();

    let Some(log_dir) = ding_core::config::app_dir() else {
        init_stderr_only(debug_logging);
        return None;
    };

    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        // Can't use tracing yet since subscriber not initialized
        eprintln!(
            "Failed to create log directory {:?}: {}, using stderr only",
            log_dir, e
        );
        init_stderr_only(debug_logging);
        return None;
    }

    let log_path = log_dir.join("ding.log");
    let file_appender = match BasicRollingFileAppender::new(
        &log_path,
        RollingConditionBasic::new().max_size(1024 * 1024),
        1,
    ) {
        Ok(appender) => appender,
        Err(e) => {
            eprintln!("Failed to create log file at {:?}: {}", log_path, e);
            init_stderr_only(debug_logging);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_names(true)
        .with_span_events(FmtSpan::NONE);

    let stderr_layer = debug_logging.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_span_events(FmtSpan::NONE)
    });

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .with(filter(debug_logging))
        .init();

    tracing::info!(log_file = ?log_path, debug_logging, "ding logging initialized");

    Some(guard)
}

/// Fallback: stderr-only logging when file logging is unavailable.
fn init_stderr_only(debug_logging: bool) {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    // Without a log file, only warnings reach the terminal unless debugging
    let directive = if debug_logging { DEBUG_DIRECTIVE } else { "warn" };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(EnvFilter::new(directive))
        .init();

    tracing::debug!(debug_logging, "ding logging initialized (stderr only)");
}

fn filter(debug_logging: bool) -> EnvFilter {
    if debug_logging {
        EnvFilter::new(DEBUG_DIRECTIVE)
    } else {
        EnvFilter::new("info")
    }
}
