//! # Persistence Layer
//!
//! Record store port and its implementations.
//!
//! ## Repository Traits (Ports)
//!
//! - [`VehicleRepository`]: Persistence for vehicle records
//!
//! ## Implementations
//!
//! - `in_memory`: In-memory implementation for tests and local runs
//! - `postgres`: PostgreSQL implementation using sqlx

pub mod in_memory;
pub mod postgres;
pub mod traits;

pub use in_memory::InMemoryVehicleRepository;
pub use postgres::PostgresVehicleRepository;
pub use traits::{RepositoryError, RepositoryResult, VehicleRepository};
