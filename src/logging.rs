//! Structured JSONL logging plus human-readable stderr output.
//!
//! Dual-output logging for the embedding application:
//! - **JSONL to file** (`<config dir>/model-picker/logs/model-picker.jsonl`)
//! - **Pretty to stderr** for developers
//!
//! ```rust,ignore
//! use model_picker::logging;
//!
//! // MUST keep the guard alive for the duration of the program
//! let _guard = logging::init();
//! tracing::info!(event_type = "picker_open", "Model picker activated");
//! ```

use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Guard that must be kept alive for the duration of the program.
/// Dropping this guard will flush and close the log file.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Initialize the dual-output logging system.
///
/// Returns a guard that MUST be kept alive for the duration of the program.
/// Dropping the guard flushes remaining logs and closes the file.
pub fn init() -> LoggingGuard {
    let log_dir = log_dir();
    if let Err(e) = fs::create_dir_all(&log_dir) {
        eprintln!("[LOGGING] Failed to create log directory: {}", e);
    }

    let path = log_path();

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .unwrap_or_else(|e| {
            eprintln!("[LOGGING] Failed to open log file: {}", e);
            OpenOptions::new()
                .write(true)
                .open("/dev/null")
                .expect("Failed to open /dev/null")
        });

    // Non-blocking writer so logging never stalls an event-handling turn
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // JSONL layer for file output
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

    // Pretty layer for stderr
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
        event_type = "lifecycle",
        action = "started",
        log_path = %path.display(),
        "Picker logging initialized"
    );

    LoggingGuard {
        _file_guard: file_guard,
    }
}

fn log_dir() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("model-picker").join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("model-picker-logs"))
}

/// Path to the JSONL log file.
pub fn log_path() -> PathBuf {
    log_dir().join("model-picker.jsonl")
}
