//! # Module Registry
//!
//! Host-side table of named consent-adapter factories. The host looks up the
//! module id delivered by its dashboard and instantiates the adapter with the
//! accompanying credentials.
//!
//! ```rust,ignore
//! let mut registry = ModuleRegistry::new();
//! registry.register("acme_cmp", |credentials| Arc::new(AcmeAdapter::new(credentials)));
//!
//! let adapter = registry.instantiate("acme_cmp", Some(&credentials))?;
//! adapter.initialize(&configuration).await?;
//! ```

use crate::module::{ConsentAdapter, Credentials, ModuleError};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Factory producing a fresh adapter instance from optional credentials.
pub type ConsentAdapterFactory =
    Arc<dyn Fn(Option<&Credentials>) -> Arc<dyn ConsentAdapter> + Send + Sync>;

/// Registry of consent-adapter factories by module id.
#[derive(Default)]
pub struct ModuleRegistry {
    factories: RwLock<HashMap<String, ConsentAdapterFactory>>,
}

impl ModuleRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under `module_id`, replacing any previous one.
    pub fn register<F>(&self, module_id: impl Into<String>, factory: F)
    where
        F: Fn(Option<&Credentials>) -> Arc<dyn ConsentAdapter> + Send + Sync + 'static,
    {
        let module_id = module_id.into();
        let previous = self
            .factories
            .write()
            .insert(module_id.clone(), Arc::new(factory));

        if previous.is_some() {
            warn!(module = %module_id, "Replacing previously registered module factory");
        } else {
            debug!(module = %module_id, "Registered module factory");
        }
    }

    /// Whether a factory is registered under `module_id`.
    #[must_use]
    pub fn contains(&self, module_id: &str) -> bool {
        self.factories.read().contains_key(module_id)
    }

    /// Registered module ids, sorted.
    #[must_use]
    pub fn module_ids(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.factories.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Build a new adapter instance.
    pub fn instantiate(
        &self,
        module_id: &str,
        credentials: Option<&Credentials>,
    ) -> Result<Arc<dyn ConsentAdapter>, ModuleError> {
        // Clone the factory out so it runs without the registry lock held.
        let factory = self
            .factories
            .read()
            .get(module_id)
            .cloned()
            .ok_or_else(|| ModuleError::UnknownModule(module_id.to_string()))?;

        Ok(factory(credentials))
    }
}
