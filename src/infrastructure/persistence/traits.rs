//! # Repository Traits
//!
//! Port definitions for persistence abstraction.
//!
//! [`VehicleRepository`] is the record store contract the aggregation
//! service depends on. Implementations can use different backends such as
//! PostgreSQL or in-memory storage.
//!
//! # Examples
//!
//! ```ignore
//! use vehicles_api::infrastructure::persistence::traits::VehicleRepository;
//!
//! async fn count_vehicles(repo: &impl VehicleRepository) {
//!     let all = repo.find_all().await.unwrap();
//!     println!("Found {} vehicles", all.len());
//! }
//! ```

use crate::domain::entities::Vehicle;
use crate::domain::value_objects::VehicleId;
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Error type for repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query error.
    #[error("Query error: {0}")]
    Query(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RepositoryError {
    /// Creates a connection error.
    #[must_use]
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a query error.
    #[must_use]
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Record store for vehicles.
///
/// Implementations persist only the identifier, condition, details,
/// coordinates and audit timestamps. Price and resolved address are dropped
/// before writing, so every vehicle read back carries no enrichment data.
///
/// A successful [`save`](VehicleRepository::save) must be visible to an
/// immediately following [`find_by_id`](VehicleRepository::find_by_id).
#[async_trait]
pub trait VehicleRepository: Send + Sync + fmt::Debug {
    /// Gets all vehicles, ordered by identifier.
    async fn find_all(&self) -> RepositoryResult<Vec<Vehicle>>;

    /// Gets a vehicle by ID.
    ///
    /// Returns `None` if the vehicle does not exist.
    async fn find_by_id(&self, id: VehicleId) -> RepositoryResult<Option<Vehicle>>;

    /// Saves a vehicle and returns the persisted record.
    ///
    /// A vehicle without an identifier is created and assigned one. A vehicle
    /// with an identifier overwrites the record stored under it.
    async fn save(&self, vehicle: Vehicle) -> RepositoryResult<Vehicle>;

    /// Deletes a vehicle by ID.
    ///
    /// Returns `Ok(true)` if the vehicle was deleted, `Ok(false)` if it didn't exist.
    async fn delete(&self, id: VehicleId) -> RepositoryResult<bool>;

    /// Counts all vehicles.
    async fn count(&self) -> RepositoryResult<u64>;
}
