//! Shared, weakly-held slot for the host's consent delegate.

use consent_types::{ConsentAdapterDelegate, ConsentKey, ConsentValue};
use parking_lot::RwLock;
use std::sync::{Arc, Weak};
use tracing::trace;

/// Clones share the same slot, so the change observer sees delegates
/// installed after it subscribed.
#[derive(Clone, Default)]
pub struct DelegateSlot {
    inner: Arc<RwLock<Option<Weak<dyn ConsentAdapterDelegate>>>>,
}

impl DelegateSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, delegate: Weak<dyn ConsentAdapterDelegate>) {
        *self.inner.write() = Some(delegate);
    }

    /// The delegate, if one is installed and still alive.
    pub fn get(&self) -> Option<Arc<dyn ConsentAdapterDelegate>> {
        self.inner.read().as_ref().and_then(Weak::upgrade)
    }

    /// Forward a single-standard change to the delegate.
    pub fn notify_consent_change(&self, key: ConsentKey, value: Option<ConsentValue>) {
        match self.get() {
            Some(delegate) => delegate.on_consent_change(key, value),
            None => trace!(key = %key, "No delegate installed, consent change not forwarded"),
        }
    }
}
