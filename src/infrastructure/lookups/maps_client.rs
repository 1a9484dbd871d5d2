//! # Maps Client
//!
//! [`LocationLookup`] backed by the maps (reverse geocoding) service.
//!
//! The service answers `GET /maps?lat={lat}&lon={lon}` with
//! `{"address": "...", "city": "...", "state": "...", "zip": "..."}`.

use crate::domain::value_objects::{Address, Coordinates, Location};
use crate::infrastructure::lookups::error::{LookupKind, LookupResult};
use crate::infrastructure::lookups::http_client::HttpClient;
use crate::infrastructure::lookups::traits::LocationLookup;
use async_trait::async_trait;
use serde::Deserialize;

const MAPS_PATH: &str = "/maps";

#[derive(Debug, Deserialize)]
struct AddressResponse {
    address: String,
    city: String,
    state: String,
    zip: String,
}

impl From<AddressResponse> for Address {
    fn from(r: AddressResponse) -> Self {
        Address::new(r.address, r.city, r.state, r.zip)
    }
}

/// HTTP client for the maps service.
#[derive(Debug, Clone)]
pub struct MapsClient {
    http: HttpClient,
}

impl MapsClient {
    /// Creates a maps client for the service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::Internal` if the HTTP client cannot be created.
    pub fn new(base_url: impl Into<String>, timeout_ms: u64) -> LookupResult<Self> {
        Ok(Self {
            http: HttpClient::new(LookupKind::Location, base_url, timeout_ms)?,
        })
    }
}

#[async_trait]
impl LocationLookup for MapsClient {
    async fn get_address(&self, coordinates: Coordinates) -> LookupResult<Location> {
        let response: AddressResponse = self
            .http
            .get_with_params(
                MAPS_PATH,
                &[("lat", coordinates.lat()), ("lon", coordinates.lon())],
            )
            .await?;
        tracing::debug!(%coordinates, city = %response.city, "address resolved");
        Ok(Location::new(coordinates).with_address(response.into()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::infrastructure::lookups::error::LookupError;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn get_address_attaches_resolved_address() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/maps"))
            .and(query_param("lat", "40.5"))
            .and(query_param("lon", "-73.25"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "address": "777 Brockton Avenue",
                "city": "Abington",
                "state": "MA",
                "zip": "2351"
            })))
            .mount(&server)
            .await;

        let client = MapsClient::new(server.uri(), 1000).unwrap();
        let coords = Coordinates::new(40.5, -73.25).unwrap();
        let location = client.get_address(coords).await.unwrap();

        assert_eq!(location.coordinates(), coords);
        let address = location.address().unwrap();
        assert_eq!(address.street(), "777 Brockton Avenue");
        assert_eq!(address.city(), "Abington");
        assert_eq!(address.zip(), "2351");
    }

    #[tokio::test]
    async fn incomplete_body_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/maps"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"city": "Abington"})),
            )
            .mount(&server)
            .await;

        let client = MapsClient::new(server.uri(), 1000).unwrap();
        let err = client
            .get_address(Coordinates::new(1.0, 2.0).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LookupError::MalformedResponse {
                kind: LookupKind::Location,
                ..
            }
        ));
    }
}
