//! Configuration for the UMP consent adapter
//!
//! Debug settings arrive as sparse dashboard credentials. Malformed or unknown
//! values are skipped, never fatal. Once debug settings exist they are never
//! replaced: the first writer wins, whether that is a credentials-bearing
//! construction or a direct `DebugSettingsCell::set`.

use crate::domain::entities::DebugSettings;
use crate::domain::value_objects::DebugGeography;
use consent_types::Credentials;
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// Credentials key holding the list of test device identifiers.
pub const TEST_DEVICE_IDENTIFIERS_KEY: &str = "testDeviceIdentifiers";

/// Credentials key holding the integer debug geography code.
pub const GEOGRAPHY_KEY: &str = "geography";

impl DebugSettings {
    /// Derive debug settings from dashboard credentials.
    ///
    /// Returns `None` only when no credentials were supplied. Unrecognized
    /// values leave the corresponding field at its default.
    pub fn from_credentials(credentials: Option<&Credentials>) -> Option<Self> {
        let credentials = credentials?;
        let mut settings = DebugSettings::new();

        if let Some(identifiers) = credentials
            .get(TEST_DEVICE_IDENTIFIERS_KEY)
            .and_then(|v| v.as_array())
        {
            settings.test_device_identifiers = identifiers
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect();
            debug!(
                count = settings.test_device_identifiers.len(),
                "Applied test device identifiers from credentials"
            );
        }

        if let Some(geography) = credentials
            .get(GEOGRAPHY_KEY)
            .and_then(|v| v.as_i64())
            .and_then(DebugGeography::from_code)
        {
            settings.geography = geography;
            debug!(geography = ?geography, "Applied debug geography from credentials");
        }

        Some(settings)
    }
}

/// First-write-wins holder for the debug settings.
///
/// Clones share the same slot. Hand one cell to every component that builds
/// adapter instances so they agree on a single configuration.
#[derive(Clone, Debug, Default)]
pub struct DebugSettingsCell {
    inner: Arc<OnceLock<DebugSettings>>,
}

impl DebugSettingsCell {
    /// Create an empty cell.
    pub fn new() -> Self {
        Self::default()
    }

    /// A cell shared by the whole process, created on first use.
    pub fn process_wide() -> Self {
        static PROCESS_WIDE: OnceLock<DebugSettingsCell> = OnceLock::new();
        PROCESS_WIDE.get_or_init(DebugSettingsCell::new).clone()
    }

    /// Current settings, if any were stored.
    pub fn get(&self) -> Option<DebugSettings> {
        self.inner.get().cloned()
    }

    /// Whether settings were already stored.
    pub fn is_set(&self) -> bool {
        self.inner.get().is_some()
    }

    /// Store `settings` if the cell is empty. Returns whether they were applied.
    pub fn set(&self, settings: DebugSettings) -> bool {
        self.inner.set(settings).is_ok()
    }

    /// Derive and store settings from credentials if the cell is empty.
    /// Returns whether anything was stored.
    pub fn apply_credentials(&self, credentials: Option<&Credentials>) -> bool {
        if self.is_set() {
            debug!("Debug settings already configured, credentials ignored");
            return false;
        }

        match DebugSettings::from_credentials(credentials) {
            Some(settings) => self.set(settings),
            None => false,
        }
    }
}
