//! # In-Memory Settings Store
//!
//! Process-local implementation of `SettingsStore`. Writers call
//! `set_string` / `remove`; subscribers watching the written key are notified
//! synchronously on the writer's thread once the write is visible.

use crate::store::{
    ChangeDisposition, ChangeHandler, SettingsChange, SettingsStore, StoreError, SubscriptionId,
};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace};

/// One registered watcher.
struct Watch {
    keys: HashSet<String>,
    handler: ChangeHandler,
}

/// In-memory settings store.
pub struct InMemorySettingsStore {
    /// Stored values by key.
    values: RwLock<HashMap<String, String>>,

    /// Active subscriptions.
    subscriptions: RwLock<HashMap<SubscriptionId, Watch>>,

    /// Next subscription id.
    next_id: AtomicU64,
}

impl InMemorySettingsStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
            subscriptions: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Create a store pre-populated with values. No notifications are sent.
    pub fn with_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        store
            .values
            .write()
            .extend(values.into_iter().map(|(k, v)| (k.into(), v.into())));
        store
    }

    /// Write `value` under `key`, notifying watchers if it changed.
    pub fn set_string(&self, key: &str, value: impl Into<String>) {
        let value = value.into();
        let changed = {
            let mut values = self.values.write();
            match values.get(key) {
                Some(existing) if *existing == value => false,
                _ => {
                    values.insert(key.to_string(), value);
                    true
                }
            }
        };

        if changed {
            self.notify(key);
        }
    }

    /// Remove `key`, notifying watchers if it was present.
    pub fn remove(&self, key: &str) {
        let removed = self.values.write().remove(key).is_some();
        if removed {
            self.notify(key);
        }
    }

    /// Number of active subscriptions.
    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.read().len()
    }

    fn notify(&self, key: &str) {
        // Handlers may re-enter the store, so none run under a lock.
        let handlers: Vec<ChangeHandler> = self
            .subscriptions
            .read()
            .values()
            .filter(|watch| watch.keys.contains(key))
            .map(|watch| watch.handler.clone())
            .collect();

        let change = SettingsChange {
            key: key.to_string(),
        };
        for handler in handlers {
            if handler(&change) == ChangeDisposition::Unhandled {
                trace!(key = %change.key, "Unhandled settings change dropped");
            }
        }
    }
}

impl Default for InMemorySettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore for InMemorySettingsStore {
    fn string(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    fn subscribe(&self, keys: &[&str], handler: ChangeHandler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let watch = Watch {
            keys: keys.iter().map(|k| (*k).to_string()).collect(),
            handler,
        };
        self.subscriptions.write().insert(id, watch);

        debug!(subscription = %id, keys = ?keys, "Settings subscription created");
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> Result<(), StoreError> {
        if self.subscriptions.write().remove(&id).is_none() {
            return Err(StoreError::NotSubscribed(id));
        }

        debug!(subscription = %id, "Settings subscription removed");
        Ok(())
    }
}
