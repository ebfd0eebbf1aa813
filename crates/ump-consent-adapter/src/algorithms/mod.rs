//! Algorithms module for the UMP consent adapter
//!
//! Contains:
//! - CMP state to normalized consent mapping

pub mod consent_mapping;

pub use consent_mapping::{
    consents_from, normalized_status, read_consent_value, should_collect_consent,
};
