//! # Consent Types Crate
//!
//! The host module system's consent abstraction, shared by every consent
//! adapter.
//!
//! ## Design Principles
//!
//! - **Normalized model**: adapters translate CMP-native state into
//!   `ConsentStatus` and a sparse `ConsentKey -> ConsentValue` mapping.
//! - **Absence is not denial**: a standard missing from `consents()` means the
//!   CMP reported nothing for it.
//! - **Explicit factories**: adapters are instantiated through named factories
//!   in a `ModuleRegistry`, never by reflection.

pub mod consent;
pub mod module;
pub mod registry;

pub use consent::*;
pub use module::*;
pub use registry::{ConsentAdapterFactory, ModuleRegistry};
