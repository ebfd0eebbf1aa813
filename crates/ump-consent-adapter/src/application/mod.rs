//! # Application Module
//!
//! Application services orchestrating the domain and outbound ports.

pub mod delegate;
pub mod factory;
pub mod observer;
pub mod service;

pub use delegate::DelegateSlot;
pub use factory::UmpAdapterFactory;
pub use observer::ConsentStringObserver;
pub use service::{UmpCollaborators, UmpConsentAdapter};
