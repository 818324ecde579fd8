//! Logging Module
//!
//! Console output plus an optional daily rolling log file, both filtered by
//! `RUST_LOG`. Library code only emits `tracing` events; installing the
//! subscriber is left to the binary.

use std::path::Path;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "orders_service=info,tower_http=info";

/// Log files are named `orders-service.<date>.log`.
pub const LOG_FILE_PREFIX: &str = "orders-service";

/// Non-blocking writer over a log file that rolls over daily in `dir`.
///
/// Buffered lines are flushed when the returned guard is dropped.
pub fn file_writer(dir: &Path) -> Result<(NonBlocking, WorkerGuard), InitError> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(dir)?;
    Ok(tracing_appender::non_blocking(appender))
}

/// Installs the global subscriber.
///
/// Keep the returned guard alive for as long as the process logs.
pub fn init(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>, InitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let (writer, guard) = file_writer(dir)?;
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();

    Ok(guard)
}
