//! # Module Contract
//!
//! Traits the host module system uses to drive a consent adapter, and the
//! delegate trait the host implements to hear about consent changes.
//!
//! ## Lifecycle
//!
//! ```text
//! factory(credentials) ──► instance ──► initialize(config) ──► queries / actions
//!                                             │
//!                                             └──► delegate.on_consent_change(..)
//! ```

use crate::consent::{
    ConsentDialogType, ConsentKey, ConsentSource, ConsentStatus, ConsentValue, Consents,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Weak;
use thiserror::Error;

/// Sparse configuration hints delivered from the host's remote dashboard.
pub type Credentials = serde_json::Map<String, serde_json::Value>;

/// Opaque handle to whatever UI surface a dialog should be presented from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PresentationAnchor(pub String);

/// Host configuration handed to every module on `initialize`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleConfiguration {
    /// Host SDK configuration identifier.
    pub sdk_configuration_id: String,
}

/// Module lifecycle errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModuleError {
    /// The module could not finish initialization. The module stays usable.
    #[error("Module initialization failed: {0}")]
    InitializationFailed(String),

    /// No factory is registered under the requested module id.
    #[error("Unknown module: {0}")]
    UnknownModule(String),
}

/// Host environment facts a module may consult.
pub trait AnalyticsEnvironment: Send + Sync {
    /// Whether the current user has been flagged as under the age of consent.
    fn is_user_underage(&self) -> bool;
}

/// Lifecycle contract shared by every host module.
#[async_trait]
pub trait Module: Send + Sync {
    /// Stable module identifier.
    fn module_id(&self) -> &'static str;

    /// Dotted numeric version string.
    fn module_version(&self) -> &'static str;

    /// Configure the module. Resolves once the module's startup work finished.
    async fn initialize(&self, configuration: &ModuleConfiguration) -> Result<(), ModuleError>;
}

/// Receives consent change notifications from an adapter.
pub trait ConsentAdapterDelegate: Send + Sync {
    /// A single standard's value changed. `None` means the value was removed.
    fn on_consent_change(&self, key: ConsentKey, value: Option<ConsentValue>);

    /// The normalized consent status changed.
    fn on_consent_status_change(&self, _status: ConsentStatus) {}

    /// A downstream partner's consent status changed.
    fn on_partner_consent_status_change(&self, _partner_id: &str, _status: ConsentStatus) {}
}

/// Host-facing consent adapter contract.
///
/// Action methods report success as `bool`. `reset_consent` and
/// `show_consent_dialog` are synchronous: their result is reported as soon as
/// the request has been issued, before any scheduled work completes.
#[async_trait]
pub trait ConsentAdapter: Module {
    /// Whether the CMP wants the host to collect consent right now.
    fn should_collect_consent(&self) -> bool;

    /// Normalized consent status.
    fn consent_status(&self) -> ConsentStatus;

    /// Per-partner consent status, keyed by partner id.
    fn partner_consent_status(&self) -> HashMap<String, ConsentStatus>;

    /// Current per-standard consent values.
    fn consents(&self) -> Consents;

    /// Programmatically grant consent.
    async fn grant_consent(&self, source: ConsentSource) -> bool;

    /// Programmatically deny consent.
    async fn deny_consent(&self, source: ConsentSource) -> bool;

    /// Clear the CMP's consent state.
    fn reset_consent(&self) -> bool;

    /// Ask the CMP to present a consent dialog.
    fn show_consent_dialog(
        &self,
        dialog_type: &ConsentDialogType,
        anchor: &PresentationAnchor,
    ) -> bool;

    /// Install the host's delegate. The adapter keeps only a weak reference.
    fn set_delegate(&self, delegate: Weak<dyn ConsentAdapterDelegate>);
}
