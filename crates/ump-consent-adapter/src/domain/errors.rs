//! Error types for the UMP consent adapter

use consent_types::ModuleError;
use settings_store::StoreError;
use thiserror::Error;

/// Error reported by the CMP SDK.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("CMP error {code}: {message}")]
pub struct CmpError {
    /// SDK error code.
    pub code: i64,
    /// SDK error description.
    pub message: String,
}

impl CmpError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// All errors that can occur in the adapter
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The CMP could not refresh its consent info
    #[error("Consent info update failed: {0}")]
    ConsentInfoUpdate(#[source] CmpError),

    /// A consent form could not be presented
    #[error("Consent form presentation failed: {0}")]
    Presentation(#[source] CmpError),

    /// Settings store bookkeeping failed
    #[error("Settings store error: {0}")]
    Store(#[from] StoreError),

    /// The main execution context could not be started
    #[error("Main context unavailable: {0}")]
    MainContext(#[from] std::io::Error),
}

impl From<AdapterError> for ModuleError {
    fn from(err: AdapterError) -> Self {
        ModuleError::InitializationFailed(err.to_string())
    }
}
