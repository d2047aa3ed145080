//! Domain module for the IL
//!
//! Contains value objects, entities, errors, and invariants.

pub mod entities;
pub mod errors;
pub mod invariants;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use value_objects::*;
