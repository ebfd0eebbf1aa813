//! Adapter factory and registry wiring.

use crate::application::service::{UmpCollaborators, UmpConsentAdapter};
use crate::config::DebugSettingsCell;
use crate::MODULE_ID;
use consent_types::{ConsentAdapter, Credentials, ModuleRegistry};
use std::sync::Arc;
use tracing::info;

/// Builds adapter instances that share one set of collaborators and one
/// debug settings cell.
#[derive(Clone)]
pub struct UmpAdapterFactory {
    collaborators: UmpCollaborators,
    debug_settings: DebugSettingsCell,
}

impl UmpAdapterFactory {
    /// Factory backed by the process-wide debug settings cell.
    pub fn new(collaborators: UmpCollaborators) -> Self {
        Self::with_debug_settings(collaborators, DebugSettingsCell::process_wide())
    }

    /// Factory backed by a caller-supplied cell.
    pub fn with_debug_settings(
        collaborators: UmpCollaborators,
        debug_settings: DebugSettingsCell,
    ) -> Self {
        Self {
            collaborators,
            debug_settings,
        }
    }

    pub fn debug_settings(&self) -> &DebugSettingsCell {
        &self.debug_settings
    }

    /// Construct a fresh adapter. Performs no I/O.
    pub fn build(&self, credentials: Option<&Credentials>) -> UmpConsentAdapter {
        UmpConsentAdapter::new(
            self.collaborators.clone(),
            self.debug_settings.clone(),
            credentials,
        )
    }

    /// Register this factory under [`MODULE_ID`].
    pub fn register(self, registry: &ModuleRegistry) {
        registry.register(MODULE_ID, move |credentials| {
            Arc::new(self.build(credentials)) as Arc<dyn ConsentAdapter>
        });
        info!(module = MODULE_ID, "Consent adapter factory registered");
    }
}
