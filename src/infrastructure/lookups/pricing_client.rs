//! # Pricing Client
//!
//! [`PriceLookup`] backed by the pricing service.
//!
//! The service answers `GET /services/price?vehicleId={id}` with
//! `{"currency": "USD", "price": 12345.67, "vehicleId": 1}`; the display
//! price is the currency followed by the amount.

use crate::domain::value_objects::VehicleId;
use crate::infrastructure::lookups::error::{LookupKind, LookupResult};
use crate::infrastructure::lookups::http_client::HttpClient;
use crate::infrastructure::lookups::traits::PriceLookup;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

const PRICE_PATH: &str = "/services/price";

/// Price as returned by the pricing service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    /// ISO currency code.
    pub currency: String,
    /// Amount in `currency`.
    pub price: Decimal,
    /// Vehicle the quote is for.
    #[serde(default)]
    pub vehicle_id: Option<u64>,
}

impl PriceQuote {
    /// Formats the quote for display, e.g. `"USD 12345.67"`.
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} {}", self.currency, self.price)
    }
}

/// HTTP client for the pricing service.
#[derive(Debug, Clone)]
pub struct PricingClient {
    http: HttpClient,
}

impl PricingClient {
    /// Creates a pricing client for the service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::Internal` if the HTTP client cannot be created.
    pub fn new(base_url: impl Into<String>, timeout_ms: u64) -> LookupResult<Self> {
        Ok(Self {
            http: HttpClient::new(LookupKind::Price, base_url, timeout_ms)?,
        })
    }

    /// Fetches the raw price quote for a vehicle.
    ///
    /// # Errors
    ///
    /// Returns a `LookupError` if the request fails or the response is malformed.
    pub async fn fetch_quote(&self, id: VehicleId) -> LookupResult<PriceQuote> {
        self.http
            .get_with_params(PRICE_PATH, &[("vehicleId", id.get())])
            .await
    }
}

#[async_trait]
impl PriceLookup for PricingClient {
    async fn get_price(&self, id: VehicleId) -> LookupResult<String> {
        let quote = self.fetch_quote(id).await?;
        tracing::debug!(vehicle_id = %id, currency = %quote.currency, "price fetched");
        Ok(quote.display())
    }
}
