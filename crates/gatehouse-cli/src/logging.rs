//! Tracing subscriber setup.

use std::path::Path;

use gatehouse_core::config::LoggingSettings;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const LOG_FILE_PREFIX: &str = "gatehouse.log";

/// Installs the global subscriber.
///
/// `RUST_LOG` overrides the configured level; `--verbose` raises the default
/// to `debug`. When file logging is enabled the returned guard must be kept
/// alive until exit so buffered lines get flushed.
pub fn init(settings: &LoggingSettings, logs_dir: Option<&Path>, verbose: bool) -> Option<WorkerGuard> {
    let default_directive = if verbose { "debug" } else { settings.level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let (file_layer, guard) = match logs_dir {
        Some(dir) if settings.log_to_file => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        _ => (None, None),
    };

    // A subscriber may already be installed (tests); keep going without ours.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    guard
}
