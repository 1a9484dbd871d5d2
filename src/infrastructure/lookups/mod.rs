//! # Enrichment Lookups
//!
//! Ports and HTTP adapters for the two external enrichment services.
//!
//! ## Ports
//!
//! - [`PriceLookup`]: vehicle id to display price
//! - [`LocationLookup`]: coordinates to resolved address
//!
//! ## Adapters
//!
//! - [`PricingClient`]: pricing service over HTTP
//! - [`MapsClient`]: maps service over HTTP

pub mod error;
pub mod http_client;
pub mod maps_client;
pub mod pricing_client;
pub mod traits;

pub use error::{LookupError, LookupKind, LookupResult};
pub use maps_client::MapsClient;
pub use pricing_client::{PriceQuote, PricingClient};
pub use traits::{LocationLookup, PriceLookup};
