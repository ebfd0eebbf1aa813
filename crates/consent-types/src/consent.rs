//! # Consent Model
//!
//! The normalized, host-facing consent vocabulary. Every consent adapter maps
//! its CMP's native state onto these types.
//!
//! `ConsentKey` and `ConsentDialogType` are open newtypes rather than closed
//! enums: adapters may report CMP-specific standards, and hosts may request
//! dialog types a given adapter does not know about.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

/// Normalized consent status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsentStatus {
    /// No affirmative signal either way.
    #[default]
    Unknown,
    /// The user granted consent.
    Granted,
    /// The user denied consent.
    Denied,
}

impl fmt::Display for ConsentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Granted => write!(f, "granted"),
            Self::Denied => write!(f, "denied"),
        }
    }
}

/// Identifier of a consent standard (TCF, USP, GPP, or CMP-specific).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConsentKey(Cow<'static, str>);

impl ConsentKey {
    /// IAB Transparency and Consent Framework.
    pub const TCF: ConsentKey = ConsentKey(Cow::Borrowed("tcf"));
    /// IAB US Privacy string.
    pub const USP: ConsentKey = ConsentKey(Cow::Borrowed("usp"));
    /// IAB Global Privacy Platform.
    pub const GPP: ConsentKey = ConsentKey(Cow::Borrowed("gpp"));

    /// Create a CMP-specific key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(Cow::Owned(key.into()))
    }

    /// The raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConsentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque consent payload: a raw IAB string or a boolean-like token.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConsentValue(Cow<'static, str>);

impl ConsentValue {
    /// Token for an affirmative non-string signal.
    pub const GRANTED: ConsentValue = ConsentValue(Cow::Borrowed("granted"));
    /// Token for a negative non-string signal.
    pub const DENIED: ConsentValue = ConsentValue(Cow::Borrowed("denied"));

    /// Wrap a raw value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(Cow::Owned(value.into()))
    }

    /// The raw payload.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConsentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ConsentValue {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for ConsentValue {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Sparse mapping of standard to value. A missing key means "no opinion".
pub type Consents = HashMap<ConsentKey, ConsentValue>;

/// Who initiated a consent action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsentSource {
    /// The end user, through a custom consent UI.
    User,
    /// The publisher's code, without user interaction.
    Developer,
}

impl fmt::Display for ConsentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Developer => write!(f, "developer"),
        }
    }
}

/// Kind of consent dialog the host asks an adapter to show.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConsentDialogType(Cow<'static, str>);

impl ConsentDialogType {
    /// Short first-layer dialog.
    pub const CONCISE: ConsentDialogType = ConsentDialogType(Cow::Borrowed("concise"));
    /// Full settings dialog.
    pub const DETAILED: ConsentDialogType = ConsentDialogType(Cow::Borrowed("detailed"));

    /// Create a dialog type outside the well-known set.
    pub fn new(kind: impl Into<String>) -> Self {
        Self(Cow::Owned(kind.into()))
    }

    /// The raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConsentDialogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
