//! # PostgreSQL Repositories
//!
//! sqlx-backed implementations of the persistence ports.

pub mod vehicle_repository;

pub use vehicle_repository::PostgresVehicleRepository;
