//! # Location
//!
//! Geographic position of a vehicle.
//!
//! A [`Location`] has two parts with different authority:
//!
//! - [`Coordinates`] are persisted and owned by the record store.
//! - [`Address`] is resolved by the maps service on every read and never
//!   persisted. A location loaded from storage carries no address.
//!
//! # Examples
//!
//! ```
//! use vehicles_api::domain::value_objects::{Address, Coordinates, Location};
//!
//! let coords = Coordinates::new(40.730610, -73.935242)?;
//! let location = Location::new(coords);
//! assert!(location.address().is_none());
//!
//! let resolved = location.with_address(Address::new("777 Brockton Avenue", "Abington", "MA", "2351"));
//! assert_eq!(resolved.address().map(|a| a.city()), Some("Abington"));
//! # Ok::<(), vehicles_api::domain::DomainError>(())
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinates")]
pub struct Coordinates {
    lat: f64,
    lon: f64,
}

#[derive(Deserialize)]
struct RawCoordinates {
    lat: f64,
    lon: f64,
}

impl TryFrom<RawCoordinates> for Coordinates {
    type Error = DomainError;

    fn try_from(raw: RawCoordinates) -> Result<Self, Self::Error> {
        Self::new(raw.lat, raw.lon)
    }
}

impl Coordinates {
    /// Creates validated coordinates.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidLatitude` if `lat` is not finite or
    /// outside [-90, 90], and `DomainError::InvalidLongitude` if `lon` is
    /// not finite or outside [-180, 180].
    pub fn new(lat: f64, lon: f64) -> DomainResult<Self> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(DomainError::InvalidLatitude(lat));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(DomainError::InvalidLongitude(lon));
        }
        Ok(Self { lat, lon })
    }

    /// Returns the latitude.
    #[inline]
    #[must_use]
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Returns the longitude.
    #[inline]
    #[must_use]
    pub fn lon(&self) -> f64 {
        self.lon
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lon)
    }
}

/// Reverse-geocoded street address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    address: String,
    city: String,
    state: String,
    zip: String,
}

impl Address {
    /// Creates an address.
    #[must_use]
    pub fn new(
        address: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zip: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            city: city.into(),
            state: state.into(),
            zip: zip.into(),
        }
    }

    /// Returns the street line.
    #[inline]
    #[must_use]
    pub fn street(&self) -> &str {
        &self.address
    }

    /// Returns the city.
    #[inline]
    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Returns the state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Returns the postal code.
    #[inline]
    #[must_use]
    pub fn zip(&self) -> &str {
        &self.zip
    }
}

/// Coordinates plus an optional resolved address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    coordinates: Coordinates,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    address: Option<Address>,
}

impl Location {
    /// Creates a location with no resolved address.
    #[must_use]
    pub fn new(coordinates: Coordinates) -> Self {
        Self {
            coordinates,
            address: None,
        }
    }

    /// Attaches a resolved address.
    #[must_use]
    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    /// Returns the coordinates.
    #[inline]
    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    /// Returns the resolved address, if any.
    #[inline]
    #[must_use]
    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    /// Drops the resolved address, keeping only what may be persisted.
    #[must_use]
    pub fn without_address(self) -> Self {
        Self::new(self.coordinates)
    }
}

impl From<Coordinates> for Location {
    fn from(coordinates: Coordinates) -> Self {
        Self::new(coordinates)
    }
}
