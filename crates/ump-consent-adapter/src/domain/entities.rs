//! Entities for the UMP consent adapter

use super::value_objects::DebugGeography;
use serde::{Deserialize, Serialize};

/// Test-only overrides forwarded to the CMP with every consent-info request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugSettings {
    /// Devices the CMP should treat as test devices.
    pub test_device_identifiers: Vec<String>,
    /// Simulated geography.
    pub geography: DebugGeography,
}

impl DebugSettings {
    /// Create settings with no test devices and no geography override.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_test_device_identifiers(mut self, identifiers: Vec<String>) -> Self {
        self.test_device_identifiers = identifiers;
        self
    }

    pub fn with_geography(mut self, geography: DebugGeography) -> Self {
        self.geography = geography;
        self
    }
}

/// Parameters of one consent-info refresh.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentInfoRequest {
    /// Whether the user is flagged as under the age of consent.
    pub tag_for_under_age_of_consent: bool,
    /// Debug overrides, if any were configured.
    pub debug_settings: Option<DebugSettings>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_settings_builder() {
        let settings = DebugSettings::new()
            .with_test_device_identifiers(vec!["ABC".to_string()])
            .with_geography(DebugGeography::Eea);

        assert_eq!(settings.test_device_identifiers, vec!["ABC".to_string()]);
        assert_eq!(settings.geography, DebugGeography::Eea);
    }

    #[test]
    fn test_default_request_has_no_overrides() {
        let request = ConsentInfoRequest::default();
        assert!(!request.tag_for_under_age_of_consent);
        assert!(request.debug_settings.is_none());
    }
}
