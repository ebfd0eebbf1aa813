//! # UMP Consent Adapter
//!
//! Bridges the User Messaging Platform SDK into the host's consent module
//! system. The CMP decides when consent is needed and presents its own forms;
//! this crate reports what the CMP persisted in the normalized host model.
//!
//! ## Architecture
//!
//! - **Domain**: CMP-native statuses, debug settings, consent string keys
//! - **Algorithms**: CMP state to normalized consent mapping
//! - **Ports**: Outbound (UserMessagingPlatform, MainContext)
//! - **Adapters**: MainThreadExecutor (dedicated UI thread)
//! - **Application**: UmpConsentAdapter service, change observer, factory
//!
//! ## Data Flow
//!
//! ```text
//! host ──► initialize ──► CMP refresh ──► observe IAB strings
//!                                              │
//!            settings store change ────────────┘──► delegate.on_consent_change
//!
//! host ──► show_consent_dialog ──► MainContext ──► CMP form
//! ```
//!
//! ## Consent Strings
//!
//! | Standard | Storage key |
//! |----------|-------------|
//! | `tcf` | `IABTCF_TCString` |
//! | `gpp` | `IABGPP_HDR_GppString` |
//! | `usp` | `IABUSPrivacy_String` |

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

/// Module identifier reported to the host.
pub const MODULE_ID: &str = "google_user_messaging_platform";

/// Module version reported to the host.
pub const MODULE_VERSION: &str = "1.2.0.0.0";

pub use adapters::{MainThreadExecutor, MAIN_THREAD_NAME};
pub use application::{UmpAdapterFactory, UmpCollaborators, UmpConsentAdapter};
pub use config::DebugSettingsCell;
pub use domain::entities::*;
pub use domain::errors::{AdapterError, CmpError};
pub use domain::value_objects::*;
pub use ports::outbound::{MainContext, MainTask, UserMessagingPlatform};
