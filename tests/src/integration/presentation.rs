//! # Dialog Presentation Tests
//!
//! Shows consent dialogs through a real `MainThreadExecutor` and checks that
//! the CMP forms run on the UI thread, never on the caller's.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    use async_trait::async_trait;
    use consent_types::{ConsentAdapter, ConsentDialogType, PresentationAnchor};
    use parking_lot::Mutex;
    use settings_store::InMemorySettingsStore;
    use tokio::sync::mpsc;
    use ump_consent_adapter::ports::outbound::mocks::StaticEnvironment;
    use ump_consent_adapter::{
        CmpError, ConsentInfoRequest, DebugSettingsCell, FormPresentation, FormStatus,
        MainThreadExecutor, UmpCollaborators, UmpConsentAdapter, UmpConsentStatus,
        UserMessagingPlatform, MAIN_THREAD_NAME,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// One presentation call as seen by the CMP
    #[derive(Debug, Clone, PartialEq, Eq)]
    struct PresentationCall {
        presentation: FormPresentation,
        anchor: PresentationAnchor,
        thread: Option<String>,
    }

    /// CMP that reports each presentation with the thread it ran on
    struct ThreadRecordingPlatform {
        calls: mpsc::UnboundedSender<PresentationCall>,
        fail: Mutex<bool>,
    }

    impl ThreadRecordingPlatform {
        fn record(
            &self,
            presentation: FormPresentation,
            anchor: &PresentationAnchor,
        ) -> Result<(), CmpError> {
            let _ = self.calls.send(PresentationCall {
                presentation,
                anchor: anchor.clone(),
                thread: thread::current().name().map(str::to_string),
            });
            if *self.fail.lock() {
                Err(CmpError::new(3, "form not available"))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl UserMessagingPlatform for ThreadRecordingPlatform {
        fn form_status(&self) -> FormStatus {
            FormStatus::Available
        }

        fn consent_status(&self) -> UmpConsentStatus {
            UmpConsentStatus::Required
        }

        async fn request_consent_info_update(
            &self,
            _request: ConsentInfoRequest,
        ) -> Result<(), CmpError> {
            Ok(())
        }

        fn reset(&self) {}

        async fn load_and_present_if_required(
            &self,
            anchor: &PresentationAnchor,
        ) -> Result<(), CmpError> {
            self.record(FormPresentation::LoadAndPresentIfRequired, anchor)
        }

        async fn present_privacy_options_form(
            &self,
            anchor: &PresentationAnchor,
        ) -> Result<(), CmpError> {
            self.record(FormPresentation::PrivacyOptions, anchor)
        }
    }

    fn setup() -> (
        UmpConsentAdapter,
        Arc<ThreadRecordingPlatform>,
        mpsc::UnboundedReceiver<PresentationCall>,
    ) {
        consent_telemetry::init_test_logging();

        let (tx, rx) = mpsc::unbounded_channel();
        let platform = Arc::new(ThreadRecordingPlatform {
            calls: tx,
            fail: Mutex::new(false),
        });
        let executor = MainThreadExecutor::start().expect("executor thread");
        let collaborators = UmpCollaborators {
            platform: platform.clone(),
            store: Arc::new(InMemorySettingsStore::new()),
            main_context: Arc::new(executor),
            environment: Arc::new(StaticEnvironment::new(false)),
        };

        let adapter = UmpConsentAdapter::new(collaborators, DebugSettingsCell::new(), None);
        (adapter, platform, rx)
    }

    async fn next_call(rx: &mut mpsc::UnboundedReceiver<PresentationCall>) -> PresentationCall {
        tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("presentation within timeout")
            .expect("platform alive")
    }

    // =============================================================================
    // PRESENTATION ON THE UI THREAD
    // =============================================================================

    #[tokio::test]
    async fn test_concise_dialog_presents_on_main_thread() {
        let (adapter, _platform, mut rx) = setup();
        let anchor = PresentationAnchor("home-screen".to_string());

        assert!(adapter.show_consent_dialog(&ConsentDialogType::CONCISE, &anchor));

        let call = next_call(&mut rx).await;
        assert_eq!(call.presentation, FormPresentation::LoadAndPresentIfRequired);
        assert_eq!(call.anchor, anchor);
        assert_eq!(call.thread.as_deref(), Some(MAIN_THREAD_NAME));
    }

    #[tokio::test]
    async fn test_detailed_dialog_presents_privacy_options() {
        let (adapter, _platform, mut rx) = setup();

        assert!(adapter.show_consent_dialog(
            &ConsentDialogType::DETAILED,
            &PresentationAnchor::default()
        ));

        let call = next_call(&mut rx).await;
        assert_eq!(call.presentation, FormPresentation::PrivacyOptions);
        assert_eq!(call.thread.as_deref(), Some(MAIN_THREAD_NAME));
    }

    #[tokio::test]
    async fn test_presentations_run_in_request_order() {
        let (adapter, _platform, mut rx) = setup();
        let anchor = PresentationAnchor::default();

        assert!(adapter.show_consent_dialog(&ConsentDialogType::DETAILED, &anchor));
        assert!(adapter.show_consent_dialog(&ConsentDialogType::CONCISE, &anchor));

        assert_eq!(
            next_call(&mut rx).await.presentation,
            FormPresentation::PrivacyOptions
        );
        assert_eq!(
            next_call(&mut rx).await.presentation,
            FormPresentation::LoadAndPresentIfRequired
        );
    }

    #[tokio::test]
    async fn test_presentation_failure_still_reports_request_issued() {
        let (adapter, platform, mut rx) = setup();
        *platform.fail.lock() = true;

        assert!(adapter.show_consent_dialog(
            &ConsentDialogType::CONCISE,
            &PresentationAnchor::default()
        ));

        let call = next_call(&mut rx).await;
        assert_eq!(call.thread.as_deref(), Some(MAIN_THREAD_NAME));
    }

    #[tokio::test]
    async fn test_unknown_dialog_type_never_reaches_main_thread() {
        let (adapter, _platform, mut rx) = setup();

        assert!(!adapter.show_consent_dialog(
            &ConsentDialogType::new("fullscreen"),
            &PresentationAnchor::default()
        ));

        let result = tokio::time::timeout(Duration::from_millis(100), rx.recv()).await;
        assert!(result.is_err());
    }
}
