//! # API Layer
//!
//! External interfaces.
//!
//! - [`rest`]: REST endpoints using axum

pub mod rest;
