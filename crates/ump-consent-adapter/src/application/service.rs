//! UMP Consent Adapter Service
//!
//! Main service implementing the host's `ConsentAdapter` contract on top of
//! the User Messaging Platform SDK.
//!
//! ## Startup
//!
//! 1. Build a consent-info request (under-age flag + debug settings)
//! 2. Await the CMP refresh
//! 3. Start observing the persisted consent strings (once)
//!
//! Observation begins only after the refresh, so strings the CMP writes
//! during startup are not reported as changes. The host reads `consents()`
//! after `initialize` returns.

use crate::algorithms::{consents_from, normalized_status, should_collect_consent};
use crate::application::delegate::DelegateSlot;
use crate::application::observer::ConsentStringObserver;
use crate::config::DebugSettingsCell;
use crate::domain::entities::ConsentInfoRequest;
use crate::domain::errors::{AdapterError, CmpError};
use crate::domain::value_objects::FormPresentation;
use crate::ports::outbound::{MainContext, UserMessagingPlatform};
use crate::{MODULE_ID, MODULE_VERSION};
use async_trait::async_trait;
use consent_types::{
    AnalyticsEnvironment, ConsentAdapter, ConsentAdapterDelegate, ConsentDialogType,
    ConsentSource, ConsentStatus, Consents, Credentials, Module, ModuleConfiguration, ModuleError,
    PresentationAnchor,
};
use parking_lot::Mutex;
use settings_store::SettingsStore;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::thread;
use tokio::runtime::Handle;
use tracing::{debug, error, info, warn};

/// Name of the thread that runs a refresh when no runtime is reachable.
const REFRESH_THREAD_NAME: &str = "cmp-refresh";

/// External collaborators of the adapter.
#[derive(Clone)]
pub struct UmpCollaborators {
    /// The CMP SDK.
    pub platform: Arc<dyn UserMessagingPlatform>,
    /// Persisted settings holding the IAB strings.
    pub store: Arc<dyn SettingsStore>,
    /// UI execution context for form presentation.
    pub main_context: Arc<dyn MainContext>,
    /// Host environment (under-age flag).
    pub environment: Arc<dyn AnalyticsEnvironment>,
}

/// Consent adapter for the User Messaging Platform.
pub struct UmpConsentAdapter {
    platform: Arc<dyn UserMessagingPlatform>,
    store: Arc<dyn SettingsStore>,
    main_context: Arc<dyn MainContext>,
    environment: Arc<dyn AnalyticsEnvironment>,
    debug_settings: DebugSettingsCell,
    delegate: DelegateSlot,
    observer: ConsentStringObserver,
    /// Runtime background refreshes are spawned on when the caller has none.
    runtime: Mutex<Option<Handle>>,
}

impl UmpConsentAdapter {
    /// Construct an adapter.
    ///
    /// If `debug_settings` is still empty, it is filled from `credentials`.
    /// Performs no I/O; instances are cheap to create and discard.
    pub fn new(
        collaborators: UmpCollaborators,
        debug_settings: DebugSettingsCell,
        credentials: Option<&Credentials>,
    ) -> Self {
        if debug_settings.apply_credentials(credentials) {
            info!(module = MODULE_ID, "Debug settings configured from credentials");
        }

        let delegate = DelegateSlot::new();
        let observer = ConsentStringObserver::new(collaborators.store.clone(), delegate.clone());

        Self {
            platform: collaborators.platform,
            store: collaborators.store,
            main_context: collaborators.main_context,
            environment: collaborators.environment,
            debug_settings,
            delegate,
            observer,
            runtime: Mutex::new(Handle::try_current().ok()),
        }
    }

    /// The debug settings cell this adapter reads from.
    pub fn debug_settings(&self) -> &DebugSettingsCell {
        &self.debug_settings
    }

    /// Whether the consent-string observation is active.
    pub fn is_observing(&self) -> bool {
        self.observer.is_observing()
    }

    /// Tear down observation ahead of drop.
    pub fn shutdown(&self) -> Result<(), AdapterError> {
        if self.observer.stop()? {
            debug!(module = MODULE_ID, "Consent adapter shut down");
        }
        Ok(())
    }

    /// Run a refresh in the background, on the caller's runtime if any, else
    /// on the runtime seen at construction or `initialize`, else on a
    /// dedicated thread.
    fn spawn_refresh(&self) {
        let platform = self.platform.clone();
        let request = self.consent_info_request();

        let handle = Handle::try_current()
            .ok()
            .or_else(|| self.runtime.lock().clone());
        if let Some(handle) = handle {
            handle.spawn(async move {
                let _ = refresh_consent_info(platform, request).await;
            });
            return;
        }

        let spawned = thread::Builder::new()
            .name(REFRESH_THREAD_NAME.to_string())
            .spawn(move || {
                match tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                {
                    Ok(runtime) => {
                        let _ = runtime.block_on(refresh_consent_info(platform, request));
                    }
                    Err(err) => {
                        error!(module = MODULE_ID, error = %err, "Could not start refresh runtime");
                    }
                }
            });
        if let Err(err) = spawned {
            error!(module = MODULE_ID, error = %err, "Could not start refresh thread");
        }
    }

    fn consent_info_request(&self) -> ConsentInfoRequest {
        ConsentInfoRequest {
            tag_for_under_age_of_consent: self.environment.is_user_underage(),
            debug_settings: self.debug_settings.get(),
        }
    }
}

/// Run one consent-info refresh and log its outcome.
async fn refresh_consent_info(
    platform: Arc<dyn UserMessagingPlatform>,
    request: ConsentInfoRequest,
) -> Result<(), AdapterError> {
    debug!(
        module = MODULE_ID,
        underage = request.tag_for_under_age_of_consent,
        debug_settings = request.debug_settings.is_some(),
        "Requesting consent info update"
    );

    match platform.request_consent_info_update(request).await {
        Ok(()) => {
            info!(module = MODULE_ID, "Consent info update succeeded");
            Ok(())
        }
        Err(err) => {
            error!(module = MODULE_ID, error = %err, "Consent info update failed");
            Err(AdapterError::ConsentInfoUpdate(err))
        }
    }
}

/// Run one form presentation on the UI context and log its outcome.
async fn present_form(
    platform: Arc<dyn UserMessagingPlatform>,
    presentation: FormPresentation,
    anchor: PresentationAnchor,
) {
    let result: Result<(), CmpError> = match presentation {
        FormPresentation::LoadAndPresentIfRequired => {
            platform.load_and_present_if_required(&anchor).await
        }
        FormPresentation::PrivacyOptions => platform.present_privacy_options_form(&anchor).await,
    };

    match result {
        Ok(()) => info!(module = MODULE_ID, presentation = ?presentation, "Consent form presented"),
        Err(err) => {
            let err = AdapterError::Presentation(err);
            error!(module = MODULE_ID, presentation = ?presentation, error = %err, "Consent form presentation failed");
        }
    }
}

#[async_trait]
impl Module for UmpConsentAdapter {
    fn module_id(&self) -> &'static str {
        MODULE_ID
    }

    fn module_version(&self) -> &'static str {
        MODULE_VERSION
    }

    async fn initialize(&self, _configuration: &ModuleConfiguration) -> Result<(), ModuleError> {
        if let Ok(handle) = Handle::try_current() {
            *self.runtime.lock() = Some(handle);
        }

        let request = self.consent_info_request();
        let result = refresh_consent_info(self.platform.clone(), request).await;

        // Refresh failure is not fatal; observation starts either way.
        self.observer.start();

        result.map_err(ModuleError::from)
    }
}

#[async_trait]
impl ConsentAdapter for UmpConsentAdapter {
    fn should_collect_consent(&self) -> bool {
        should_collect_consent(self.platform.form_status(), self.platform.consent_status())
    }

    fn consent_status(&self) -> ConsentStatus {
        normalized_status(self.platform.consent_status())
    }

    fn partner_consent_status(&self) -> HashMap<String, ConsentStatus> {
        HashMap::new()
    }

    fn consents(&self) -> Consents {
        consents_from(self.store.as_ref())
    }

    async fn grant_consent(&self, source: ConsentSource) -> bool {
        warn!(module = MODULE_ID, source = %source, "Grant consent is not supported by this CMP");
        false
    }

    async fn deny_consent(&self, source: ConsentSource) -> bool {
        warn!(module = MODULE_ID, source = %source, "Deny consent is not supported by this CMP");
        false
    }

    fn reset_consent(&self) -> bool {
        self.platform.reset();
        debug!(module = MODULE_ID, "Consent state reset");

        // Fire and forget: the outcome is only logged.
        self.spawn_refresh();

        true
    }

    fn show_consent_dialog(
        &self,
        dialog_type: &ConsentDialogType,
        anchor: &PresentationAnchor,
    ) -> bool {
        let Some(presentation) = FormPresentation::for_dialog_type(dialog_type) else {
            error!(module = MODULE_ID, dialog_type = %dialog_type, "Unsupported consent dialog type");
            return false;
        };

        debug!(module = MODULE_ID, dialog_type = %dialog_type, "Scheduling consent form presentation");
        self.main_context.dispatch(Box::pin(present_form(
            self.platform.clone(),
            presentation,
            anchor.clone(),
        )));

        true
    }

    fn set_delegate(&self, delegate: Weak<dyn ConsentAdapterDelegate>) {
        self.delegate.set(delegate);
    }
}
