//! Structured JSONL logging plus human-readable stderr output.
//!
//! Dual output:
//! - **JSONL to file** (~/.shortcut-engine/logs/shortcut-engine.jsonl) for tooling
//! - **Compact to stderr** for developers
//!
//! The library itself only emits `tracing` events; binaries call [`init`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use shortcut_engine::logging;
//!
//! // Initialize logging - MUST keep guard alive for duration of program
//! let _guard = logging::init();
//!
//! tracing::info!(event_type = "app_start", "Application started");
//! ```

use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const LOG_FILE_NAME: &str = "shortcut-engine.jsonl";

/// Guard that must be kept alive for the duration of the program.
/// Dropping this guard will flush and close the log file.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Initialize the dual-output logging system.
///
/// Returns a guard that MUST be kept alive for the duration of the program.
pub fn init() -> LoggingGuard {
    let log_dir = get_log_dir();
    if let Err(e) = fs::create_dir_all(&log_dir) {
        eprintln!("[LOGGING] Failed to create log directory: {}", e);
    }

    let log_path = log_dir.join(LOG_FILE_NAME);

    // Non-blocking writer so a slow disk never stalls input dispatch
    let (non_blocking_file, file_guard) = match OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => tracing_appender::non_blocking(file),
        Err(e) => {
            eprintln!("[LOGGING] Failed to open log file: {}", e);
            tracing_appender::non_blocking(std::io::sink())
        }
    };

    // Environment filter - default to info, allow override via RUST_LOG
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json_layer = fmt::layer()
        .json()
        .with_writer(non_blocking_file)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .with_span_events(FmtSpan::NONE);

    let pretty_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(pretty_layer)
        .init();

    tracing::info!(
        event_type = "app_lifecycle",
        action = "started",
        log_path = %log_path.display(),
        "Logging initialized"
    );

    LoggingGuard {
        _file_guard: file_guard,
    }
}

/// Get the log directory path (~/.shortcut-engine/logs/)
fn get_log_dir() -> PathBuf {
    crate::config::config_dir().join("logs")
}

/// Get the path to the JSONL log file
pub fn log_path() -> PathBuf {
    get_log_dir().join(LOG_FILE_NAME)
}

/// Log a keyboard event with structured fields
pub fn log_key_event(key: &str, modifiers: &str, outcome: &str) {
    tracing::debug!(
        event_type = "key_event",
        key = key,
        modifiers = modifiers,
        outcome = outcome,
        "Key {} -> {}", key, outcome
    );
}
