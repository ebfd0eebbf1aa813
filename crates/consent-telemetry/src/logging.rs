//! Structured logging setup.
//!
//! Every line carries the standard fields:
//! - `level`: Log level (trace, debug, info, warn, error)
//! - `target`: Emitting crate/module
//! - `module`: Consent module identifier, when emitted via `log_consent_event!`
//! - Additional context fields

use crate::{TelemetryConfig, TelemetryError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Handle returned once the global subscriber is installed.
#[derive(Debug)]
pub struct LoggingGuard {
    service_name: String,
}

impl LoggingGuard {
    /// Service name the subscriber was installed for.
    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}

impl Drop for LoggingGuard {
    fn drop(&mut self) {
        tracing::debug!(service = %self.service_name, "Logging guard dropped");
    }
}

/// Build the env filter, preferring `RUST_LOG` directives when present.
pub(crate) fn env_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| TelemetryError::Filter(e.to_string()))
}

/// Install the global `tracing` subscriber.
///
/// Fails with `TelemetryError::AlreadyInitialized` if another subscriber is
/// already installed.
pub fn init_logging(config: &TelemetryConfig) -> Result<LoggingGuard, TelemetryError> {
    let filter = env_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let result = match (config.console_output, config.json_logs) {
        (true, true) => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .try_init(),
        (true, false) => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_names(true)
                    .with_ansi(true),
            )
            .try_init(),
        (false, _) => registry.try_init(),
    };
    result.map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))?;

    tracing::info!(
        service = %config.service_name,
        json_logs = config.json_logs,
        "Logging initialized"
    );

    Ok(LoggingGuard {
        service_name: config.service_name.clone(),
    })
}

/// Install a test-writer subscriber, ignoring the error if one already exists.
pub fn init_test_logging() {
    let config = TelemetryConfig::for_tests();
    let Ok(filter) = env_filter(&config) else {
        return;
    };
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}

/// Emit a log line tagged with the consent module identifier.
#[macro_export]
macro_rules! log_consent_event {
    ($level:ident, $module:expr, $msg:expr $(, $($field:tt)*)?) => {
        $crate::tracing::$level!(
            module = $module,
            $($($field)*,)?
            $msg
        )
    };
}
