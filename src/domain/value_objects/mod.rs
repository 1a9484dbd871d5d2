//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Identity
//!
//! - [`VehicleId`]: store-assigned numeric identifier
//!
//! ## Location
//!
//! - [`Coordinates`]: validated latitude/longitude, the persisted part of a location
//! - [`Address`]: reverse-geocoded address, never persisted
//! - [`Location`]: coordinates plus an optional resolved address
//!
//! ## Descriptive
//!
//! - [`Details`], [`Manufacturer`], [`Condition`]

pub mod details;
pub mod ids;
pub mod location;

pub use details::{Condition, Details, Manufacturer};
pub use ids::VehicleId;
pub use location::{Address, Coordinates, Location};
