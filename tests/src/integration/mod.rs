//! Integration tests across the consent crates.

pub mod flows;
pub mod presentation;
