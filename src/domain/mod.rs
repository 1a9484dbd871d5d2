//! # Domain Layer
//!
//! Entities and value objects for vehicle records.
//!
//! - [`entities`]: the [`Vehicle`](entities::Vehicle) aggregate
//! - [`value_objects`]: identifiers, coordinates, addresses and details
//! - [`errors`]: validation failures raised by value object constructors

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use errors::{DomainError, DomainResult};
