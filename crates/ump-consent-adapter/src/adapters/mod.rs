//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements outbound port traits the host platform does not supply itself.

mod main_thread;

pub use main_thread::{MainThreadExecutor, MAIN_THREAD_NAME};
