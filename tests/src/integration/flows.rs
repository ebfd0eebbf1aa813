//! # Integration Test Flows
//!
//! Drives the UMP consent adapter through the host's module registry with an
//! in-memory settings store and a scripted CMP.
//!
//! ## Flows Tested:
//!
//! 1. **Registry → Adapter**: the dashboard module id resolves to the adapter
//! 2. **Credentials → Debug settings**: first construction configures, later ones do not
//! 3. **Initialize → Observe**: startup writes are silent, later writes are reported

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use consent_types::{
        ConsentAdapter, ConsentAdapterDelegate, ConsentKey, ConsentStatus, ConsentValue,
        Credentials, ModuleConfiguration, ModuleRegistry,
    };
    use serde_json::json;
    use settings_store::InMemorySettingsStore;
    use ump_consent_adapter::ports::outbound::mocks::{
        MockMessagingPlatform, RecordingDelegate, RecordingMainContext, StaticEnvironment,
    };
    use ump_consent_adapter::{
        DebugGeography, DebugSettingsCell, FormStatus, UmpAdapterFactory, UmpCollaborators,
        UmpConsentStatus, MODULE_ID,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    struct Host {
        registry: ModuleRegistry,
        platform: Arc<MockMessagingPlatform>,
        store: Arc<InMemorySettingsStore>,
        debug_settings: DebugSettingsCell,
    }

    /// Host with the UMP factory registered against a private settings cell
    fn host() -> Host {
        consent_telemetry::init_test_logging();

        let platform = Arc::new(MockMessagingPlatform::new());
        let store = Arc::new(InMemorySettingsStore::new());
        let collaborators = UmpCollaborators {
            platform: platform.clone(),
            store: store.clone(),
            main_context: Arc::new(RecordingMainContext::new()),
            environment: Arc::new(StaticEnvironment::new(false)),
        };

        let debug_settings = DebugSettingsCell::new();
        let registry = ModuleRegistry::new();
        UmpAdapterFactory::with_debug_settings(collaborators, debug_settings.clone())
            .register(&registry);

        Host {
            registry,
            platform,
            store,
            debug_settings,
        }
    }

    fn credentials(value: serde_json::Value) -> Credentials {
        value.as_object().cloned().unwrap_or_default()
    }

    fn attach_delegate(adapter: &Arc<dyn ConsentAdapter>) -> Arc<RecordingDelegate> {
        let delegate = Arc::new(RecordingDelegate::new());
        let as_dyn: Arc<dyn ConsentAdapterDelegate> = delegate.clone();
        adapter.set_delegate(Arc::downgrade(&as_dyn));
        delegate
    }

    // =============================================================================
    // REGISTRY AND CONFIGURATION
    // =============================================================================

    #[test]
    fn test_dashboard_module_id_resolves_to_ump_adapter() {
        let host = host();

        assert_eq!(host.registry.module_ids(), vec![MODULE_ID.to_string()]);

        let adapter = host.registry.instantiate(MODULE_ID, None).unwrap();
        assert_eq!(adapter.module_id(), "google_user_messaging_platform");
        assert_eq!(adapter.module_version(), "1.2.0.0.0");
        assert!(host.debug_settings.get().is_none());
    }

    #[test]
    fn test_first_credentials_configure_debug_settings_once() {
        let host = host();

        host.registry
            .instantiate(
                MODULE_ID,
                Some(&credentials(json!({"testDeviceIdentifiers": ["ABC"], "geography": 1}))),
            )
            .unwrap();
        host.registry
            .instantiate(
                MODULE_ID,
                Some(&credentials(json!({"testDeviceIdentifiers": ["XYZ"], "geography": 3}))),
            )
            .unwrap();

        let settings = host.debug_settings.get().unwrap();
        assert_eq!(settings.test_device_identifiers, vec!["ABC".to_string()]);
        assert_eq!(settings.geography, DebugGeography::Eea);
    }

    // =============================================================================
    // STARTUP AND CHANGE NOTIFICATION
    // =============================================================================

    #[tokio::test]
    async fn test_initialize_then_tcf_change_reports_one_event() {
        let host = host();
        host.platform
            .write_on_refresh(host.store.clone(), &[("IABUSPrivacy_String", "1YNN")]);
        let adapter = host.registry.instantiate(MODULE_ID, None).unwrap();
        let delegate = attach_delegate(&adapter);

        adapter
            .initialize(&ModuleConfiguration::default())
            .await
            .unwrap();

        // Startup write is visible through consents() but not reported.
        assert!(delegate.changes().is_empty());
        assert_eq!(
            adapter.consents().get(&ConsentKey::USP),
            Some(&ConsentValue::from("1YNN"))
        );

        host.store.set_string("IABTCF_TCString", "1~xyz");

        assert_eq!(
            delegate.changes(),
            vec![(ConsentKey::TCF, Some(ConsentValue::from("1~xyz")))]
        );
        assert_eq!(adapter.consents().len(), 2);
    }

    #[tokio::test]
    async fn test_cleared_string_is_absent_and_reported_as_removed() {
        let host = host();
        host.store.set_string("IABGPP_HDR_GppString", "DBABMA");
        let adapter = host.registry.instantiate(MODULE_ID, None).unwrap();
        let delegate = attach_delegate(&adapter);
        adapter
            .initialize(&ModuleConfiguration::default())
            .await
            .unwrap();

        host.store.set_string("IABGPP_HDR_GppString", "");

        assert!(adapter.consents().is_empty());
        assert_eq!(delegate.changes(), vec![(ConsentKey::GPP, None)]);
    }

    #[tokio::test]
    async fn test_should_collect_follows_cmp_state() {
        let host = host();
        let adapter = host.registry.instantiate(MODULE_ID, None).unwrap();
        adapter
            .initialize(&ModuleConfiguration::default())
            .await
            .unwrap();

        host.platform.set_form_status(FormStatus::Available);
        host.platform.set_consent_status(UmpConsentStatus::Required);
        assert!(adapter.should_collect_consent());

        host.platform.set_consent_status(UmpConsentStatus::Obtained);
        assert!(!adapter.should_collect_consent());
        assert_eq!(adapter.consent_status(), ConsentStatus::Unknown);
    }

    #[tokio::test]
    async fn test_reset_refreshes_in_background() {
        let host = host();
        let adapter = host.registry.instantiate(MODULE_ID, None).unwrap();
        adapter
            .initialize(&ModuleConfiguration::default())
            .await
            .unwrap();

        assert!(adapter.reset_consent());
        assert_eq!(host.platform.reset_calls(), 1);

        tokio::time::timeout(Duration::from_secs(1), async {
            while host.platform.refresh_completions() < 2 {
                tokio::task::yield_now().await;
            }
        })
        .await
        .unwrap();
        assert_eq!(host.platform.refresh_count(), 2);
    }

    #[tokio::test]
    async fn test_dropping_adapter_releases_subscription() {
        let host = host();
        let adapter = host.registry.instantiate(MODULE_ID, None).unwrap();
        adapter
            .initialize(&ModuleConfiguration::default())
            .await
            .unwrap();
        assert_eq!(host.store.subscription_count(), 1);

        drop(adapter);

        assert_eq!(host.store.subscription_count(), 0);
        consent_telemetry::log_consent_event!(
            debug,
            MODULE_ID,
            "Adapter dropped",
            subscriptions = host.store.subscription_count()
        );
    }
}
