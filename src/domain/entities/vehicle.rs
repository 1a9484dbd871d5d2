//! # Vehicle Entity
//!
//! The vehicle record aggregate.
//!
//! A [`Vehicle`] holds two disjoint groups of fields:
//!
//! - **Persisted**: identifier, condition, [`Details`], the coordinates of its
//!   [`Location`], and audit timestamps. The record store is authoritative.
//! - **Enrichment**: price and resolved address. These come from external
//!   lookups, are never persisted, and are only populated by the
//!   aggregation service.
//!
//! # Examples
//!
//! ```
//! use vehicles_api::domain::entities::Vehicle;
//! use vehicles_api::domain::value_objects::{Condition, Coordinates, Details, Manufacturer};
//!
//! let vehicle = Vehicle::new(
//!     Condition::Used,
//!     Details::new(Manufacturer::new(101, "Chevrolet"), "Impala"),
//!     Coordinates::new(40.73, -73.93)?,
//! );
//!
//! assert!(vehicle.is_new());
//! assert!(vehicle.price().is_none());
//! # Ok::<(), vehicles_api::domain::DomainError>(())
//! ```

use crate::domain::value_objects::{Condition, Coordinates, Details, Location, VehicleId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A vehicle record.
///
/// Identity and audit timestamps are stamped by record stores inside this
/// crate only:
///
/// ```compile_fail
/// use chrono::Utc;
/// use vehicles_api::domain::entities::Vehicle;
/// use vehicles_api::domain::value_objects::{Condition, Coordinates, Details, Manufacturer, VehicleId};
///
/// let mut vehicle = Vehicle::new(
///     Condition::New,
///     Details::new(Manufacturer::new(101, "Chevrolet"), "Impala"),
///     Coordinates::new(0.0, 0.0).unwrap(),
/// );
/// vehicle.mark_persisted(VehicleId::new(1), Utc::now());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vehicle {
    id: Option<VehicleId>,
    condition: Condition,
    details: Details,
    location: Location,
    #[serde(skip_serializing_if = "Option::is_none")]
    price: Option<String>,
    created_at: Option<DateTime<Utc>>,
    modified_at: Option<DateTime<Utc>>,
}

impl Vehicle {
    /// Creates a new, not yet persisted vehicle.
    #[must_use]
    pub fn new(condition: Condition, details: Details, coordinates: Coordinates) -> Self {
        Self {
            id: None,
            condition,
            details,
            location: Location::new(coordinates),
            price: None,
            created_at: None,
            modified_at: None,
        }
    }

    /// Reconstructs a persisted vehicle from storage.
    ///
    /// The result carries no enrichment data.
    #[must_use]
    pub fn from_parts(
        id: VehicleId,
        condition: Condition,
        details: Details,
        coordinates: Coordinates,
        created_at: DateTime<Utc>,
        modified_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Some(id),
            condition,
            details,
            location: Location::new(coordinates),
            price: None,
            created_at: Some(created_at),
            modified_at: Some(modified_at),
        }
    }

    /// Targets an existing record, turning a save into an update.
    #[must_use]
    pub fn with_id(mut self, id: VehicleId) -> Self {
        self.id = Some(id);
        self
    }

    /// Returns the identifier, absent until first persisted.
    #[inline]
    #[must_use]
    pub fn id(&self) -> Option<VehicleId> {
        self.id
    }

    /// Returns true if this vehicle has never been persisted.
    #[inline]
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Returns the condition.
    #[inline]
    #[must_use]
    pub fn condition(&self) -> Condition {
        self.condition
    }

    /// Returns the details.
    #[inline]
    #[must_use]
    pub fn details(&self) -> &Details {
        &self.details
    }

    /// Returns the location.
    #[inline]
    #[must_use]
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Returns the persisted coordinates.
    #[inline]
    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        self.location.coordinates()
    }

    /// Returns the enriched price, if this record has been enriched.
    #[inline]
    #[must_use]
    pub fn price(&self) -> Option<&str> {
        self.price.as_deref()
    }

    /// Returns when the record was first persisted.
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Returns when the record was last persisted.
    #[inline]
    #[must_use]
    pub fn modified_at(&self) -> Option<DateTime<Utc>> {
        self.modified_at
    }

    /// Copies the updatable fields of `incoming` onto this record.
    ///
    /// Only details and coordinates change. Identity, condition and
    /// timestamps are kept.
    pub(crate) fn merge_from(&mut self, incoming: &Vehicle) {
        self.details = incoming.details.clone();
        self.location = Location::new(incoming.coordinates());
    }

    /// Stamps identity and audit timestamps.
    pub(crate) fn mark_persisted(&mut self, id: VehicleId, now: DateTime<Utc>) {
        self.id = Some(id);
        if self.created_at.is_none() {
            self.created_at = Some(now);
        }
        self.modified_at = Some(now);
    }

    /// Returns a copy holding only the persisted field group.
    #[must_use]
    pub(crate) fn into_persisted(self) -> Self {
        Self {
            location: self.location.without_address(),
            price: None,
            ..self
        }
    }

    pub(crate) fn set_price(&mut self, price: String) {
        self.price = Some(price);
    }

    pub(crate) fn set_location(&mut self, location: Location) {
        self.location = location;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{Address, Manufacturer};

    fn vehicle(model: &str) -> Vehicle {
        Vehicle::new(
            Condition::New,
            Details::new(Manufacturer::new(101, "Chevrolet"), model),
            Coordinates::new(10.0, 20.0).unwrap(),
        )
    }

    #[test]
    fn new_vehicle_has_no_identity_or_enrichment() {
        let v = vehicle("Impala");
        assert!(v.is_new());
        assert!(v.price().is_none());
        assert!(v.location().address().is_none());
        assert!(v.created_at().is_none());
    }

    #[test]
    fn merge_copies_details_and_coordinates_only() {
        let mut existing = vehicle("Impala");
        existing.mark_persisted(VehicleId::new(1), Utc::now());

        let incoming = Vehicle::new(
            Condition::Used,
            Details::new(Manufacturer::new(102, "Ford"), "Focus"),
            Coordinates::new(-5.0, 7.5).unwrap(),
        );
        existing.merge_from(&incoming);

        assert_eq!(existing.id(), Some(VehicleId::new(1)));
        assert_eq!(existing.condition(), Condition::New);
        assert_eq!(existing.details().model, "Focus");
        assert_eq!(existing.coordinates(), Coordinates::new(-5.0, 7.5).unwrap());
    }

    #[test]
    fn merge_ignores_incoming_enrichment() {
        let mut existing = vehicle("Impala");
        let mut incoming = vehicle("Focus");
        incoming.set_price("USD 1".to_string());
        incoming.set_location(
            Location::new(incoming.coordinates()).with_address(Address::new("a", "b", "c", "d")),
        );

        existing.merge_from(&incoming);
        assert!(existing.price().is_none());
        assert!(existing.location().address().is_none());
    }

    #[test]
    fn mark_persisted_keeps_created_at() {
        let mut v = vehicle("Impala");
        let first = Utc::now();
        v.mark_persisted(VehicleId::new(3), first);
        let later = first + chrono::Duration::seconds(5);
        v.mark_persisted(VehicleId::new(3), later);

        assert_eq!(v.created_at(), Some(first));
        assert_eq!(v.modified_at(), Some(later));
    }

    #[test]
    fn into_persisted_strips_enrichment() {
        let mut v = vehicle("Impala");
        v.set_price("USD 100".to_string());
        v.set_location(Location::new(v.coordinates()).with_address(Address::new("a", "b", "c", "d")));

        let persisted = v.into_persisted();
        assert!(persisted.price().is_none());
        assert!(persisted.location().address().is_none());
        assert_eq!(persisted.details().model, "Impala");
    }
}
