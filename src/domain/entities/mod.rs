//! # Domain Entities
//!
//! - [`Vehicle`]: vehicle record aggregate

pub mod vehicle;

pub use vehicle::Vehicle;
