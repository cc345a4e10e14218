//! Logging setup
//!
//! Console output plus a daily-rolling file under `logs/`, both driven by
//! `RUST_LOG` (default `info`). The returned guard must stay alive for the
//! duration of the run or buffered file output is lost.

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Directory the rolling file appender writes into.
const LOG_DIR: &str = "logs";

/// File name prefix of the rolling log.
const LOG_FILE_PREFIX: &str = "sreality-crawler.log";

/// Initializes the global tracing subscriber.
pub fn init_logging() -> Result<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_appender = rolling::daily(LOG_DIR, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .try_init()?;

    Ok(guard)
}
