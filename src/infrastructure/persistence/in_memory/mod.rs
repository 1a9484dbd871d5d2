//! # In-Memory Repositories
//!
//! In-memory implementations for testing without database dependencies.
//!
//! ## Available Repositories
//!
//! - [`InMemoryVehicleRepository`]: Vehicle persistence
//!
//! ## Thread Safety
//!
//! All implementations use `Arc<RwLock<..>>` for thread-safe access.

pub mod vehicle_repository;

pub use vehicle_repository::InMemoryVehicleRepository;
