//! # Settings Store
//!
//! Persisted key-value string settings that other SDKs on the device read and
//! write (IAB consent strings live here), with a typed change-subscription
//! interface.
//!
//! ```text
//! ┌──────────────┐  set_string()   ┌───────────────┐  handler(change)  ┌────────────┐
//! │  Third-party │ ──────────────► │ SettingsStore │ ────────────────► │ Subscriber │
//! │     SDK      │                 │               │ ◄──────────────── │            │
//! └──────────────┘                 └───────────────┘   string(key)     └────────────┘
//! ```
//!
//! Notifications carry only the key; subscribers re-read the value.

pub mod memory;
pub mod store;

pub use memory::InMemorySettingsStore;
pub use store::{
    ChangeDisposition, ChangeHandler, SettingsChange, SettingsStore, StoreError, SubscriptionId,
};
