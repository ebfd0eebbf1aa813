//! Outbound Ports (Driven Ports / SPI)
//!
//! What the adapter needs from the outside world: the CMP SDK and the single
//! UI execution context. The persisted settings store port lives in the
//! `settings-store` crate; the under-age flag comes from the host's
//! `AnalyticsEnvironment`.

use crate::domain::entities::ConsentInfoRequest;
use crate::domain::errors::CmpError;
use crate::domain::value_objects::{FormStatus, UmpConsentStatus};
use async_trait::async_trait;
use consent_types::PresentationAnchor;
use std::future::Future;
use std::pin::Pin;

/// Work scheduled onto the UI execution context.
pub type MainTask = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// The User Messaging Platform SDK, treated as opaque.
#[async_trait]
pub trait UserMessagingPlatform: Send + Sync {
    /// Current consent form availability.
    fn form_status(&self) -> FormStatus;

    /// Current native consent status.
    fn consent_status(&self) -> UmpConsentStatus;

    /// Refresh consent info. May perform network I/O.
    async fn request_consent_info_update(&self, request: ConsentInfoRequest)
        -> Result<(), CmpError>;

    /// Clear all consent state held by the SDK.
    fn reset(&self);

    /// Load the consent form and present it if consent is required.
    ///
    /// Must only be called on the UI execution context.
    async fn load_and_present_if_required(&self, anchor: &PresentationAnchor)
        -> Result<(), CmpError>;

    /// Present the privacy options form.
    ///
    /// Must only be called on the UI execution context.
    async fn present_privacy_options_form(&self, anchor: &PresentationAnchor)
        -> Result<(), CmpError>;
}

/// The platform's single UI-affine execution context.
pub trait MainContext: Send + Sync {
    /// Schedule `task` to run on the UI context. Returns immediately.
    fn dispatch(&self, task: MainTask);
}

/// Mock implementations for testing
#[cfg(any(test, feature = "test-utils"))]
pub mod mocks {
    use super::*;
    use crate::domain::value_objects::FormPresentation;
    use consent_types::{AnalyticsEnvironment, ConsentAdapterDelegate, ConsentKey, ConsentValue};
    use parking_lot::Mutex;
    use settings_store::InMemorySettingsStore;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::Notify;

    /// Scriptable CMP SDK that records every call.
    #[derive(Default)]
    pub struct MockMessagingPlatform {
        form_status: Mutex<FormStatus>,
        consent_status: Mutex<UmpConsentStatus>,
        refresh_error: Mutex<Option<CmpError>>,
        presentation_error: Mutex<Option<CmpError>>,
        refresh_requests: Mutex<Vec<ConsentInfoRequest>>,
        refresh_completions: AtomicUsize,
        refresh_writes: Mutex<Option<(Arc<InMemorySettingsStore>, Vec<(String, String)>)>>,
        refresh_gate: Mutex<Option<Arc<Notify>>>,
        reset_calls: AtomicUsize,
        presentations: Mutex<Vec<FormPresentation>>,
    }

    impl MockMessagingPlatform {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_form_status(&self, status: FormStatus) {
            *self.form_status.lock() = status;
        }

        pub fn set_consent_status(&self, status: UmpConsentStatus) {
            *self.consent_status.lock() = status;
        }

        /// Make every refresh fail with `error`.
        pub fn fail_refresh(&self, error: CmpError) {
            *self.refresh_error.lock() = Some(error);
        }

        /// Make every presentation fail with `error`.
        pub fn fail_presentation(&self, error: CmpError) {
            *self.presentation_error.lock() = Some(error);
        }

        /// Write `values` into `store` while a refresh is in flight, the way
        /// the real SDK persists IAB strings.
        pub fn write_on_refresh(&self, store: Arc<InMemorySettingsStore>, values: &[(&str, &str)]) {
            let values = values
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect();
            *self.refresh_writes.lock() = Some((store, values));
        }

        /// Hold refreshes open until the returned gate is notified.
        pub fn hold_refresh(&self) -> Arc<Notify> {
            let gate = Arc::new(Notify::new());
            *self.refresh_gate.lock() = Some(gate.clone());
            gate
        }

        pub fn refresh_requests(&self) -> Vec<ConsentInfoRequest> {
            self.refresh_requests.lock().clone()
        }

        pub fn refresh_count(&self) -> usize {
            self.refresh_requests.lock().len()
        }

        pub fn refresh_completions(&self) -> usize {
            self.refresh_completions.load(Ordering::SeqCst)
        }

        pub fn reset_calls(&self) -> usize {
            self.reset_calls.load(Ordering::SeqCst)
        }

        pub fn presentations(&self) -> Vec<FormPresentation> {
            self.presentations.lock().clone()
        }

        fn present(&self, presentation: FormPresentation) -> Result<(), CmpError> {
            self.presentations.lock().push(presentation);
            match self.presentation_error.lock().clone() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl UserMessagingPlatform for MockMessagingPlatform {
        fn form_status(&self) -> FormStatus {
            *self.form_status.lock()
        }

        fn consent_status(&self) -> UmpConsentStatus {
            *self.consent_status.lock()
        }

        async fn request_consent_info_update(
            &self,
            request: ConsentInfoRequest,
        ) -> Result<(), CmpError> {
            self.refresh_requests.lock().push(request);

            let gate = self.refresh_gate.lock().clone();
            if let Some(gate) = gate {
                gate.notified().await;
            }

            let writes = self.refresh_writes.lock().clone();
            if let Some((store, values)) = writes {
                for (key, value) in values {
                    store.set_string(&key, value);
                }
            }

            self.refresh_completions.fetch_add(1, Ordering::SeqCst);
            match self.refresh_error.lock().clone() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }

        fn reset(&self) {
            self.reset_calls.fetch_add(1, Ordering::SeqCst);
        }

        async fn load_and_present_if_required(
            &self,
            _anchor: &PresentationAnchor,
        ) -> Result<(), CmpError> {
            self.present(FormPresentation::LoadAndPresentIfRequired)
        }

        async fn present_privacy_options_form(
            &self,
            _anchor: &PresentationAnchor,
        ) -> Result<(), CmpError> {
            self.present(FormPresentation::PrivacyOptions)
        }
    }

    /// Main context that queues tasks until the test runs them.
    #[derive(Default)]
    pub struct RecordingMainContext {
        tasks: Mutex<Vec<MainTask>>,
        dispatched: AtomicUsize,
    }

    impl RecordingMainContext {
        pub fn new() -> Self {
            Self::default()
        }

        /// Number of tasks dispatched so far.
        pub fn dispatched(&self) -> usize {
            self.dispatched.load(Ordering::SeqCst)
        }

        /// Run every queued task to completion, in dispatch order.
        pub async fn run_pending(&self) {
            let tasks: Vec<MainTask> = std::mem::take(&mut *self.tasks.lock());
            for task in tasks {
                task.await;
            }
        }
    }

    impl MainContext for RecordingMainContext {
        fn dispatch(&self, task: MainTask) {
            self.dispatched.fetch_add(1, Ordering::SeqCst);
            self.tasks.lock().push(task);
        }
    }

    /// Fixed host environment.
    #[derive(Default)]
    pub struct StaticEnvironment {
        underage: AtomicBool,
    }

    impl StaticEnvironment {
        pub fn new(underage: bool) -> Self {
            Self {
                underage: AtomicBool::new(underage),
            }
        }

        pub fn set_underage(&self, underage: bool) {
            self.underage.store(underage, Ordering::SeqCst);
        }
    }

    impl AnalyticsEnvironment for StaticEnvironment {
        fn is_user_underage(&self) -> bool {
            self.underage.load(Ordering::SeqCst)
        }
    }

    /// Delegate that records consent changes.
    #[derive(Default)]
    pub struct RecordingDelegate {
        changes: Mutex<Vec<(ConsentKey, Option<ConsentValue>)>>,
    }

    impl RecordingDelegate {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn changes(&self) -> Vec<(ConsentKey, Option<ConsentValue>)> {
            self.changes.lock().clone()
        }
    }

    impl ConsentAdapterDelegate for RecordingDelegate {
        fn on_consent_change(&self, key: ConsentKey, value: Option<ConsentValue>) {
            self.changes.lock().push((key, value));
        }
    }
}
