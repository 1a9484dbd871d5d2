//! # Vehicle Aggregation Service
//!
//! Combines stored vehicle records with live enrichment data.
//!
//! Every vehicle handed back to a caller has its price and address
//! re-fetched from the [`PriceLookup`] and [`LocationLookup`]
//! collaborators, regardless of what the store or the caller supplied.
//! Nothing is cached between calls.
//!
//! Each lookup is bounded by [`EnrichmentConfig::lookup_timeout_ms`]. A
//! record's two lookups run concurrently, and [`VehicleAggregationService::list`]
//! enriches up to [`EnrichmentConfig::max_concurrency`] records at once
//! while keeping the store's ordering. Any lookup failure aborts the whole
//! operation.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::entities::Vehicle;
use crate::domain::value_objects::VehicleId;
use crate::infrastructure::lookups::{
    LocationLookup, LookupError, LookupKind, LookupResult, PriceLookup,
};
use crate::infrastructure::persistence::{RepositoryError, VehicleRepository};
use futures::stream::{self, StreamExt, TryStreamExt};
use serde::Deserialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Configuration for record enrichment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// Timeout for a single price or location lookup, in milliseconds.
    pub lookup_timeout_ms: u64,
    /// Maximum number of records enriched concurrently by `list`.
    pub max_concurrency: usize,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            lookup_timeout_ms: 5000,
            max_concurrency: 8,
        }
    }
}

impl EnrichmentConfig {
    /// Creates a configuration with the specified lookup timeout.
    #[must_use]
    pub fn with_lookup_timeout(timeout_ms: u64) -> Self {
        Self {
            lookup_timeout_ms: timeout_ms,
            ..Default::default()
        }
    }

    /// Sets the maximum number of records enriched concurrently.
    #[must_use]
    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = max;
        self
    }
}

/// Service that stores vehicles and enriches them on the way out.
#[derive(Debug)]
pub struct VehicleAggregationService {
    repository: Arc<dyn VehicleRepository>,
    price_lookup: Arc<dyn PriceLookup>,
    location_lookup: Arc<dyn LocationLookup>,
    config: EnrichmentConfig,
}

impl VehicleAggregationService {
    /// Creates a new VehicleAggregationService.
    #[must_use]
    pub fn new(
        repository: Arc<dyn VehicleRepository>,
        price_lookup: Arc<dyn PriceLookup>,
        location_lookup: Arc<dyn LocationLookup>,
        config: EnrichmentConfig,
    ) -> Self {
        Self {
            repository,
            price_lookup,
            location_lookup,
            config,
        }
    }

    /// Creates a new service with default configuration.
    #[must_use]
    pub fn with_defaults(
        repository: Arc<dyn VehicleRepository>,
        price_lookup: Arc<dyn PriceLookup>,
        location_lookup: Arc<dyn LocationLookup>,
    ) -> Self {
        Self::new(
            repository,
            price_lookup,
            location_lookup,
            EnrichmentConfig::default(),
        )
    }

    /// Returns the current configuration.
    #[must_use]
    pub fn config(&self) -> &EnrichmentConfig {
        &self.config
    }

    /// Lists every stored vehicle, each enriched.
    ///
    /// Returns an empty vector when the store is empty. The result has the
    /// store's ordering.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Storage` if the store fails and
    /// `ApplicationError::Lookup` if any single record's enrichment fails.
    pub async fn list(&self) -> ApplicationResult<Vec<Vehicle>> {
        let vehicles = self.repository.find_all().await?;
        if vehicles.is_empty() {
            return Ok(Vec::new());
        }

        let total = vehicles.len();
        let enriched: Vec<Vehicle> = stream::iter(vehicles)
            .map(|vehicle| self.enrich(vehicle))
            .buffered(self.config.max_concurrency.max(1))
            .try_collect()
            .await?;

        tracing::debug!(count = total, "listed vehicles");
        Ok(enriched)
    }

    /// Gets one vehicle by ID, enriched.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NotFound` if no vehicle has this ID,
    /// `ApplicationError::Lookup` if enrichment fails and
    /// `ApplicationError::Storage` if the store fails.
    pub async fn find_by_id(&self, id: VehicleId) -> ApplicationResult<Vehicle> {
        let vehicle = self.load_existing(id).await?;
        self.enrich(vehicle).await
    }

    /// Creates or updates a vehicle and returns it enriched.
    ///
    /// A vehicle without an ID is created and the store assigns one. A
    /// vehicle with an ID must already exist: only its details and
    /// coordinates are replaced. Either way the store is written once.
    /// Price and address on the input are ignored.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NotFound` if the vehicle has an ID that is
    /// not stored, `ApplicationError::Lookup` if enrichment of the saved
    /// record fails and `ApplicationError::Storage` if the store fails.
    pub async fn save(&self, vehicle: Vehicle) -> ApplicationResult<Vehicle> {
        let to_persist = match vehicle.id() {
            Some(id) => {
                let mut existing = self.load_existing(id).await?;
                existing.merge_from(&vehicle);
                existing
            }
            None => vehicle,
        };

        let is_update = !to_persist.is_new();
        let saved = self.repository.save(to_persist).await?;
        let id = persisted_id(&saved)?;
        tracing::info!(vehicle_id = %id, is_update, "vehicle saved");

        self.enrich(saved).await
    }

    /// Deletes a vehicle by ID.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NotFound` if no vehicle has this ID and
    /// `ApplicationError::Storage` if the store fails.
    pub async fn delete(&self, id: VehicleId) -> ApplicationResult<()> {
        self.load_existing(id).await?;

        if !self.repository.delete(id).await? {
            // Removed by someone else between the lookup and the delete.
            return Err(ApplicationError::not_found(id));
        }

        tracing::info!(vehicle_id = %id, "vehicle deleted");
        Ok(())
    }

    async fn load_existing(&self, id: VehicleId) -> ApplicationResult<Vehicle> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(id))
    }

    /// Overwrites price and location with fresh lookup results.
    async fn enrich(&self, mut vehicle: Vehicle) -> ApplicationResult<Vehicle> {
        let id = persisted_id(&vehicle)?;
        let coordinates = vehicle.coordinates();

        let (price, location) = tokio::try_join!(
            self.bounded(LookupKind::Price, self.price_lookup.get_price(id)),
            self.bounded(
                LookupKind::Location,
                self.location_lookup.get_address(coordinates)
            ),
        )
        .inspect_err(|e| tracing::warn!(vehicle_id = %id, error = %e, "enrichment failed"))?;

        vehicle.set_price(price);
        vehicle.set_location(location);
        Ok(vehicle)
    }

    /// Runs a lookup under the configured timeout.
    async fn bounded<T>(
        &self,
        kind: LookupKind,
        lookup: impl Future<Output = LookupResult<T>>,
    ) -> LookupResult<T> {
        let timeout_ms = self.config.lookup_timeout_ms;
        match timeout(Duration::from_millis(timeout_ms), lookup).await {
            Ok(result) => result,
            Err(_) => Err(LookupError::timeout_with_duration(kind, timeout_ms)),
        }
    }
}

/// Records coming back from the store always carry an identifier.
fn persisted_id(vehicle: &Vehicle) -> ApplicationResult<VehicleId> {
    vehicle.id().ok_or_else(|| {
        RepositoryError::internal("record store returned a vehicle without an identifier").into()
    })
}
