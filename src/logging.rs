//! File logging.
//!
//! The terminal belongs to the UI, so events go to a daily-rolling file
//! under the platform data directory instead of stderr.

use color_eyre::{eyre::eyre, Result};
use std::path::{Path, PathBuf};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

const LOG_FILE_PREFIX: &str = "ebucars.log";

/// Where log files are written: `<data dir>/ebucars`, or the working
/// directory when the platform has no data dir.
pub fn log_dir() -> PathBuf {
  dirs::data_dir()
    .map(|d| d.join("ebucars"))
    .unwrap_or_else(|| PathBuf::from("."))
}

/// Build the filter: `RUST_LOG` wins over the configured directive.
fn build_filter(configured: &str) -> Result<EnvFilter> {
  match std::env::var(EnvFilter::DEFAULT_ENV) {
    Ok(from_env) if !from_env.trim().is_empty() => EnvFilter::try_new(from_env)
      .map_err(|e| eyre!("Invalid {} directive: {}", EnvFilter::DEFAULT_ENV, e)),
    _ => EnvFilter::try_new(configured)
      .map_err(|e| eyre!("Invalid log.filter directive {:?}: {}", configured, e)),
  }
}

/// Install the global subscriber.
///
/// The returned guard flushes buffered lines on drop and must be held until
/// the app exits.
pub fn init(filter: &str, dir: &Path) -> Result<WorkerGuard> {
  std::fs::create_dir_all(dir)
    .map_err(|e| eyre!("Failed to create log directory {}: {}", dir.display(), e))?;

  let file_appender = rolling::daily(dir, LOG_FILE_PREFIX);
  let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

  let file_layer = fmt::layer()
    .with_writer(non_blocking)
    .with_ansi(false)
    .with_target(true);

  let subscriber = Registry::default()
    .with(build_filter(filter)?)
    .with(file_layer);

  tracing::subscriber::set_global_default(subscriber)
    .map_err(|e| eyre!("Failed to set global subscriber: {}", e))?;

  tracing::info!(
    log_dir = %dir.display(),
    version = env!("CARGO_PKG_VERSION"),
    "logging initialized"
  );

  Ok(guard)
}
