//! # In-Memory Vehicle Repository
//!
//! In-memory implementation of [`VehicleRepository`].
//!
//! Vehicles are kept in a `BTreeMap` so that `find_all` returns them in
//! ascending identifier order, matching the PostgreSQL implementation.

use crate::domain::entities::Vehicle;
use crate::domain::value_objects::VehicleId;
use crate::infrastructure::persistence::traits::{
    RepositoryError, RepositoryResult, VehicleRepository,
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug)]
struct Storage {
    vehicles: BTreeMap<VehicleId, Vehicle>,
    next_id: u64,
}

impl Default for Storage {
    fn default() -> Self {
        Self {
            vehicles: BTreeMap::new(),
            next_id: 1,
        }
    }
}

/// In-memory implementation of [`VehicleRepository`].
///
/// Identifiers are assigned from a counter starting at 1.
#[derive(Debug, Clone, Default)]
pub struct InMemoryVehicleRepository {
    storage: Arc<RwLock<Storage>>,
}

impl InMemoryVehicleRepository {
    /// Creates a new empty in-memory vehicle repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of vehicles in the repository.
    ///
    /// Best-effort: reports 0 while a writer holds the lock. Use
    /// [`VehicleRepository::count`] for an exact answer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage
            .try_read()
            .map(|guard| guard.vehicles.len())
            .unwrap_or(0)
    }

    /// Returns true if the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears all vehicles from the repository.
    pub async fn clear(&self) {
        let mut storage = self.storage.write().await;
        storage.vehicles.clear();
    }
}

#[async_trait]
impl VehicleRepository for InMemoryVehicleRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Vehicle>> {
        let storage = self.storage.read().await;
        Ok(storage.vehicles.values().cloned().collect())
    }

    async fn find_by_id(&self, id: VehicleId) -> RepositoryResult<Option<Vehicle>> {
        let storage = self.storage.read().await;
        Ok(storage.vehicles.get(&id).cloned())
    }

    async fn save(&self, vehicle: Vehicle) -> RepositoryResult<Vehicle> {
        let mut storage = self.storage.write().await;

        let id = match vehicle.id() {
            Some(id) => id,
            None => {
                let id = VehicleId::new(storage.next_id);
                storage.next_id = storage
                    .next_id
                    .checked_add(1)
                    .ok_or_else(|| RepositoryError::internal("vehicle id space exhausted"))?;
                id
            }
        };
        // Explicit ids must never be handed out again by the counter.
        if id.get() >= storage.next_id {
            storage.next_id = id.get().saturating_add(1);
        }

        let mut persisted = vehicle.into_persisted();
        // An overwrite keeps the creation stamp of the record it replaces.
        if let Some(created_at) = storage.vehicles.get(&id).and_then(Vehicle::created_at) {
            persisted.mark_persisted(id, created_at);
        }
        persisted.mark_persisted(id, Utc::now());

        storage.vehicles.insert(id, persisted.clone());
        tracing::trace!(vehicle_id = %id, "vehicle stored in memory");
        Ok(persisted)
    }

    async fn delete(&self, id: VehicleId) -> RepositoryResult<bool> {
        let mut storage = self.storage.write().await;
        Ok(storage.vehicles.remove(&id).is_some())
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let storage = self.storage.read().await;
        Ok(storage.vehicles.len() as u64)
    }
}
