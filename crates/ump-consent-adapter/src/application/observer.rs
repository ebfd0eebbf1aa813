//! Consent String Observer
//!
//! Watches the three persisted IAB strings and forwards each external change
//! to the host delegate as a single-standard event.
//!
//! The subscription id doubles as the "subscribed" flag: `start` only
//! subscribes when no id is held, and `stop` only unsubscribes when one is.
//! The store treats unsubscribing an inactive id as an error, so that guard is
//! load-bearing.

use crate::algorithms::read_consent_value;
use crate::application::delegate::DelegateSlot;
use crate::domain::errors::AdapterError;
use crate::domain::value_objects::ConsentStringKey;
use parking_lot::Mutex;
use settings_store::{ChangeDisposition, ChangeHandler, SettingsChange, SettingsStore, SubscriptionId};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct ConsentStringObserver {
    store: Arc<dyn SettingsStore>,
    delegate: DelegateSlot,
    subscription: Mutex<Option<SubscriptionId>>,
}

impl ConsentStringObserver {
    pub fn new(store: Arc<dyn SettingsStore>, delegate: DelegateSlot) -> Self {
        Self {
            store,
            delegate,
            subscription: Mutex::new(None),
        }
    }

    /// Whether a subscription is currently held.
    pub fn is_observing(&self) -> bool {
        self.subscription.lock().is_some()
    }

    /// Subscribe to the consent strings. No-op if already subscribed.
    /// Returns whether a new subscription was created.
    pub fn start(&self) -> bool {
        let mut subscription = self.subscription.lock();
        if subscription.is_some() {
            debug!("Consent string observation already active");
            return false;
        }

        let id = self
            .store
            .subscribe(&ConsentStringKey::storage_keys(), self.change_handler());
        *subscription = Some(id);

        debug!(subscription = %id, "Started observing consent strings");
        true
    }

    /// Unsubscribe if subscribed, then clear the flag.
    /// Returns whether a subscription was torn down.
    pub fn stop(&self) -> Result<bool, AdapterError> {
        let Some(id) = self.subscription.lock().take() else {
            return Ok(false);
        };

        self.store.unsubscribe(id)?;
        debug!(subscription = %id, "Stopped observing consent strings");
        Ok(true)
    }

    fn change_handler(&self) -> ChangeHandler {
        // Weak store reference: the store owns this handler.
        let store = Arc::downgrade(&self.store);
        let delegate = self.delegate.clone();

        Arc::new(move |change: &SettingsChange| {
            let Some(key) = ConsentStringKey::from_storage_key(&change.key) else {
                return ChangeDisposition::Unhandled;
            };
            let Some(store) = store.upgrade() else {
                return ChangeDisposition::Handled;
            };

            let value = read_consent_value(store.as_ref(), key);
            debug!(
                key = %key.consent_key(),
                present = value.is_some(),
                "Consent string changed"
            );
            delegate.notify_consent_change(key.consent_key(), value);
            ChangeDisposition::Handled
        })
    }
}

impl Drop for ConsentStringObserver {
    fn drop(&mut self) {
        if let Err(err) = self.stop() {
            warn!(error = %err, "Failed to stop consent string observation");
        }
    }
}
