//! # Infrastructure Layer
//!
//! Adapters for storage and external services.
//!
//! - [`persistence`]: record store port and implementations
//! - [`lookups`]: price and location lookup ports and HTTP clients

pub mod lookups;
pub mod persistence;
