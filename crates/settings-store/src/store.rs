//! # Settings Store Port
//!
//! The capability a consumer needs from a persisted settings store: read a
//! string, and watch a set of keys for changes made by anyone.

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Errors from subscription bookkeeping.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The subscription is not active (never created, or already removed).
    #[error("Subscription {0} is not active")]
    NotSubscribed(SubscriptionId),
}

/// Handle identifying one active subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub(crate) u64);

impl SubscriptionId {
    /// Raw numeric value.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// A watched key changed. Handlers re-read the value from the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettingsChange {
    /// The key whose value changed.
    pub key: String,
}

/// What a handler did with a change notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeDisposition {
    /// The handler consumed the notification.
    Handled,
    /// The handler did not recognize the key; fall through to default handling.
    Unhandled,
}

/// Callback invoked on the store's notification context.
pub type ChangeHandler = Arc<dyn Fn(&SettingsChange) -> ChangeDisposition + Send + Sync>;

/// Persisted string settings with change notification.
pub trait SettingsStore: Send + Sync {
    /// Current value of `key`, or `None` when absent.
    fn string(&self, key: &str) -> Option<String>;

    /// Watch `keys`; `handler` runs once per change of any of them.
    fn subscribe(&self, keys: &[&str], handler: ChangeHandler) -> SubscriptionId;

    /// Stop a subscription.
    ///
    /// # Errors
    ///
    /// `StoreError::NotSubscribed` if `id` is not an active subscription.
    fn unsubscribe(&self, id: SubscriptionId) -> Result<(), StoreError>;
}
