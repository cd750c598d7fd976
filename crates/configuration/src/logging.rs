use crate::error::ConfigError;
use crate::settings::Logging;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global tracing subscriber.
///
/// Console output is always on; `RUST_LOG` controls the filter and defaults to
/// `info`. When a log directory is configured a daily-rolling file is added.
/// The returned guard must be held for the lifetime of the process so buffered
/// file output is flushed.
pub fn init_tracing(logging: &Logging) -> Result<Option<WorkerGuard>, ConfigError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter).with(fmt::layer());

    match &logging.directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "lifeindex.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            registry
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .try_init()
                .map_err(|e| ConfigError::LoggingError(e.to_string()))?;
            Ok(Some(guard))
        }
        None => {
            registry
                .try_init()
                .map_err(|e| ConfigError::LoggingError(e.to_string()))?;
            Ok(None)
        }
    }
}
