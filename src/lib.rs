//! # Vehicles API
//!
//! A vehicle record service that stores vehicles and, on every read or write
//! that returns a record, enriches it with a live price and a reverse-geocoded
//! address fetched from two external services.
//!
//! ## Layers
//!
//! - [`domain`]: the [`Vehicle`](domain::entities::Vehicle) entity and its
//!   value objects
//! - [`application`]: the [`VehicleAggregationService`](application::services::VehicleAggregationService)
//!   that orchestrates storage and enrichment
//! - [`infrastructure`]: record stores and the pricing/maps HTTP clients
//! - [`api`]: REST surface built on axum
//! - [`config`] and [`telemetry`]: configuration loading and logging setup

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod telemetry;
