//! Domain module for the UMP consent adapter
//!
//! Contains CMP-native value objects, request entities, and errors.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use value_objects::*;
