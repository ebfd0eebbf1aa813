//! Consent Mapping
//!
//! Pure translation from the CMP's native state to the host's normalized
//! consent model.

use crate::domain::value_objects::{ConsentStringKey, FormStatus, UmpConsentStatus};
use consent_types::{ConsentStatus, ConsentValue, Consents};
use settings_store::SettingsStore;

/// Consent should be collected only when a form is available AND the CMP says
/// the flow is required. Availability alone is not enough.
#[must_use]
pub fn should_collect_consent(form_status: FormStatus, consent_status: UmpConsentStatus) -> bool {
    form_status == FormStatus::Available && consent_status == UmpConsentStatus::Required
}

/// The native status only reports whether a flow is required, never the
/// user's choice, so it always normalizes to `Unknown`.
#[must_use]
pub fn normalized_status(_consent_status: UmpConsentStatus) -> ConsentStatus {
    ConsentStatus::Unknown
}

/// Current value of one persisted consent string. Empty strings count as absent.
pub fn read_consent_value(store: &dyn SettingsStore, key: ConsentStringKey) -> Option<ConsentValue> {
    store
        .string(key.storage_key())
        .filter(|value| !value.is_empty())
        .map(ConsentValue::from)
}

/// Sparse view over all persisted consent strings, computed fresh per call.
pub fn consents_from(store: &dyn SettingsStore) -> Consents {
    ConsentStringKey::ALL
        .into_iter()
        .filter_map(|key| read_consent_value(store, key).map(|value| (key.consent_key(), value)))
        .collect()
}
