//! # Application Layer
//!
//! Use-case orchestration on top of the domain and infrastructure layers.
//!
//! - [`services`]: the [`VehicleAggregationService`](services::VehicleAggregationService)
//! - [`error`]: the [`ApplicationError`](error::ApplicationError) taxonomy

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
