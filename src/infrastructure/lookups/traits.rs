//! # Lookup Traits
//!
//! Port definitions for the two enrichment collaborators.
//!
//! - [`PriceLookup`]: current display price of a vehicle
//! - [`LocationLookup`]: reverse geocoding of coordinates
//!
//! Implementations may block on the network; callers bound every call with
//! a timeout.

use crate::domain::value_objects::{Coordinates, Location, VehicleId};
use crate::infrastructure::lookups::error::LookupResult;
use async_trait::async_trait;
use std::fmt;

/// Looks up the current price of a vehicle.
#[async_trait]
pub trait PriceLookup: Send + Sync + fmt::Debug {
    /// Returns a human-readable price for the vehicle.
    ///
    /// # Errors
    ///
    /// Returns a `LookupError` if the price cannot be obtained.
    async fn get_price(&self, id: VehicleId) -> LookupResult<String>;
}

/// Resolves coordinates to an address.
#[async_trait]
pub trait LocationLookup: Send + Sync + fmt::Debug {
    /// Returns a location with its address resolved.
    ///
    /// The coordinates of the returned value may be echoed back unchanged.
    ///
    /// # Errors
    ///
    /// Returns a `LookupError` if the address cannot be obtained.
    async fn get_address(&self, coordinates: Coordinates) -> LookupResult<Location>;
}
