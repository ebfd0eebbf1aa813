//! Ports module for the UMP consent adapter
//!
//! The inbound port is the host's `ConsentAdapter` trait from
//! `consent-types`; this module defines the outbound (SPI) ports.

pub mod outbound;

pub use outbound::{MainContext, MainTask, UserMessagingPlatform};
