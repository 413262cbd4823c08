// src/log.rs
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::consts::LOG_FILE;
use crate::error::Result;
use crate::store::ensure_directory;

/// Log to stderr and to `<data_dir>/scraper.log`.
/// `RUST_LOG` overrides `level`. Keep the guard alive until exit or the
/// file sink loses its tail.
pub fn init(data_dir: &Path, level: &str) -> Result<WorkerGuard> {
    ensure_directory(data_dir)?;

    let appender = tracing_appender::rolling::never(data_dir, LOG_FILE);
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(fmt::layer().with_writer(file_writer).with_ansi(false).with_target(false))
        .try_init();

    Ok(guard)
}
