//! # Application Services
//!
//! Services that orchestrate domain logic and infrastructure.
//!
//! - [`VehicleAggregationService`]: storage plus live price and address enrichment

pub mod vehicle_service;

pub use vehicle_service::{EnrichmentConfig, VehicleAggregationService};
