//! # Consent Adapter Test Suite
//!
//! Cross-crate tests driving the UMP consent adapter the way a host does:
//! through the module registry, a real settings store and a real UI thread.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── flows.rs          # Registry, startup and change notification flows
//!     └── presentation.rs   # Dialog presentation on the UI thread
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p consent-tests
//! cargo test -p consent-tests integration::presentation
//! ```

#![allow(unused_variables)]
#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
