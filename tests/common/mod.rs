//! Shared test utilities for integration suites.
//!
//! Import via `mod common;`.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use vehicles_api::application::services::VehicleAggregationService;
use vehicles_api::domain::value_objects::{Address, Coordinates, Location, VehicleId};
use vehicles_api::infrastructure::lookups::{LocationLookup, LookupResult, PriceLookup};
use vehicles_api::infrastructure::persistence::InMemoryVehicleRepository;

/// Price lookup answering `"USD <id * 100>"` and counting calls.
#[derive(Debug, Default)]
pub struct IdPricing {
    calls: AtomicUsize,
}

impl IdPricing {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// The price [`IdPricing`] reports for a vehicle.
pub fn expected_price(id: VehicleId) -> String {
    format!("USD {}", id.get() * 100)
}

#[async_trait]
impl PriceLookup for IdPricing {
    async fn get_price(&self, id: VehicleId) -> LookupResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(expected_price(id))
    }
}

/// Location lookup deriving a city name from the coordinates.
#[derive(Debug, Default)]
pub struct CoordinateMaps;

/// The city [`CoordinateMaps`] reports for a position.
pub fn expected_city(coordinates: Coordinates) -> String {
    format!("City {:.3},{:.3}", coordinates.lat(), coordinates.lon())
}

#[async_trait]
impl LocationLookup for CoordinateMaps {
    async fn get_address(&self, coordinates: Coordinates) -> LookupResult<Location> {
        Ok(Location::new(coordinates).with_address(Address::new(
            "100 Test Road",
            expected_city(coordinates),
            "TS",
            "00000",
        )))
    }
}

/// A service over a fresh in-memory store with deterministic lookups.
pub struct Harness {
    pub service: VehicleAggregationService,
    pub repository: InMemoryVehicleRepository,
    pub pricing: Arc<IdPricing>,
}

pub fn harness() -> Harness {
    let repository = InMemoryVehicleRepository::new();
    let pricing = Arc::new(IdPricing::default());
    let service = VehicleAggregationService::with_defaults(
        Arc::new(repository.clone()),
        pricing.clone(),
        Arc::new(CoordinateMaps),
    );
    Harness {
        service,
        repository,
        pricing,
    }
}
