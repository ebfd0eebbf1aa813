//! Value objects for the UMP consent adapter
//!
//! The CMP's native state enums, the debug geography codes accepted from the
//! dashboard, and the three persisted IAB string keys.

use consent_types::{ConsentDialogType, ConsentKey};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether the CMP has a consent form ready to show.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormStatus {
    /// Availability has not been determined yet.
    #[default]
    Unknown,
    /// A form is available to load.
    Available,
    /// No form is available for this user.
    Unavailable,
}

/// The CMP's native consent status.
///
/// Only says whether a disclosure flow is required, not what the user chose.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UmpConsentStatus {
    /// Status has not been determined yet.
    #[default]
    Unknown,
    /// The user must be shown the consent flow.
    Required,
    /// No consent flow is needed for this user.
    NotRequired,
    /// The user already went through the flow.
    Obtained,
}

/// Simulated geography for debug builds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i64)]
pub enum DebugGeography {
    /// No override.
    #[default]
    Disabled = 0,
    /// European Economic Area.
    Eea = 1,
    /// Outside the EEA.
    NotEea = 2,
    /// A US state with privacy regulation.
    RegulatedUsState = 3,
    /// Any other region.
    Other = 4,
}

impl DebugGeography {
    /// Map a dashboard integer code; unknown codes yield `None`.
    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Disabled),
            1 => Some(Self::Eea),
            2 => Some(Self::NotEea),
            3 => Some(Self::RegulatedUsState),
            4 => Some(Self::Other),
            _ => None,
        }
    }

    /// Numeric code.
    #[must_use]
    pub fn code(self) -> i64 {
        self as i64
    }
}

/// One of the three persisted IAB consent strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConsentStringKey {
    /// TCF v2 consent string.
    Tcf,
    /// GPP string.
    Gpp,
    /// CCPA US Privacy string.
    Usp,
}

impl ConsentStringKey {
    /// All observed keys.
    pub const ALL: [ConsentStringKey; 3] = [Self::Gpp, Self::Tcf, Self::Usp];

    /// Persisted storage key. Must match the IAB names exactly.
    #[must_use]
    pub fn storage_key(self) -> &'static str {
        match self {
            Self::Tcf => "IABTCF_TCString",
            Self::Gpp => "IABGPP_HDR_GppString",
            Self::Usp => "IABUSPrivacy_String",
        }
    }

    /// Reverse lookup from a storage key.
    #[must_use]
    pub fn from_storage_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.storage_key() == key)
    }

    /// Normalized host-facing standard.
    #[must_use]
    pub fn consent_key(self) -> ConsentKey {
        match self {
            Self::Tcf => ConsentKey::TCF,
            Self::Gpp => ConsentKey::GPP,
            Self::Usp => ConsentKey::USP,
        }
    }

    /// Storage keys of every observed string.
    #[must_use]
    pub fn storage_keys() -> [&'static str; 3] {
        Self::ALL.map(Self::storage_key)
    }
}

impl fmt::Display for ConsentStringKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.storage_key())
    }
}

/// Which CMP presentation flow serves a dialog request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormPresentation {
    /// Load the consent form and present it if consent is required.
    LoadAndPresentIfRequired,
    /// Present the privacy options form.
    PrivacyOptions,
}

impl FormPresentation {
    /// Resolve a host dialog type; unsupported types yield `None`.
    #[must_use]
    pub fn for_dialog_type(dialog_type: &ConsentDialogType) -> Option<Self> {
        if *dialog_type == ConsentDialogType::CONCISE {
            Some(Self::LoadAndPresentIfRequired)
        } else if *dialog_type == ConsentDialogType::DETAILED {
            Some(Self::PrivacyOptions)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_keys_are_exact() {
        assert_eq!(ConsentStringKey::Tcf.storage_key(), "IABTCF_TCString");
        assert_eq!(ConsentStringKey::Gpp.storage_key(), "IABGPP_HDR_GppString");
        assert_eq!(ConsentStringKey::Usp.storage_key(), "IABUSPrivacy_String");
    }

    #[test]
    fn test_storage_key_reverse_lookup() {
        for key in ConsentStringKey::ALL {
            assert_eq!(ConsentStringKey::from_storage_key(key.storage_key()), Some(key));
        }
        assert_eq!(ConsentStringKey::from_storage_key("IABTCF_gdprApplies"), None);
    }

    #[test]
    fn test_consent_key_mapping() {
        assert_eq!(ConsentStringKey::Tcf.consent_key(), ConsentKey::TCF);
        assert_eq!(ConsentStringKey::Gpp.consent_key(), ConsentKey::GPP);
        assert_eq!(ConsentStringKey::Usp.consent_key(), ConsentKey::USP);
    }

    #[test]
    fn test_geography_codes() {
        assert_eq!(DebugGeography::from_code(1), Some(DebugGeography::Eea));
        assert_eq!(DebugGeography::from_code(3), Some(DebugGeography::RegulatedUsState));
        assert_eq!(DebugGeography::from_code(5), None);
        assert_eq!(DebugGeography::from_code(-1), None);
        assert_eq!(DebugGeography::Other.code(), 4);
    }

    #[test]
    fn test_dialog_type_resolution() {
        assert_eq!(
            FormPresentation::for_dialog_type(&ConsentDialogType::CONCISE),
            Some(FormPresentation::LoadAndPresentIfRequired)
        );
        assert_eq!(
            FormPresentation::for_dialog_type(&ConsentDialogType::DETAILED),
            Some(FormPresentation::PrivacyOptions)
        );
        assert_eq!(
            FormPresentation::for_dialog_type(&ConsentDialogType::new("banner")),
            None
        );
    }
}
