//! # Consent Telemetry
//!
//! Logging sink setup for hosts and tests embedding the consent adapter. The
//! adapter itself only emits `tracing` events; this crate decides where they
//! go.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use consent_telemetry::{init_logging, TelemetryConfig};
//!
//! let _guard = init_logging(&TelemetryConfig::from_env())?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `consent-adapter` | Service name in logs |
//! | `CMP_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `CMP_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `CMP_JSON_LOGS` | `false` | JSON formatted output |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{init_logging, init_test_logging, LoggingGuard};

// Re-exported for `log_consent_event!` expansions in downstream crates.
pub use tracing;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The log filter directive could not be parsed.
    #[error("Invalid log filter: {0}")]
    Filter(String),

    /// A global subscriber is already installed.
    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(String),
}
