//! # HTTP Client Utilities
//!
//! Shared HTTP client for the lookup services.
//!
//! Provides a reusable wrapper around `reqwest` with:
//! - A base URL and a per-request timeout
//! - JSON deserialization
//! - Mapping of transport and status failures to [`LookupError`]
//!
//! # Examples
//!
//! ```ignore
//! use vehicles_api::infrastructure::lookups::http_client::HttpClient;
//! use vehicles_api::infrastructure::lookups::error::LookupKind;
//!
//! let client = HttpClient::new(LookupKind::Price, "http://localhost:8082", 5000)?;
//! let response: MyResponse = client.get_with_params("/services/price", &[("vehicleId", "1")]).await?;
//! ```

use crate::infrastructure::lookups::error::{LookupError, LookupKind, LookupResult};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client wrapper for lookup services.
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// Inner reqwest client.
    client: Client,
    /// Lookup this client serves, reported in errors.
    kind: LookupKind,
    /// Base URL without trailing slash.
    base_url: String,
    /// Request timeout in milliseconds.
    timeout_ms: u64,
}

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// # Arguments
    ///
    /// * `kind` - Lookup served by this client.
    /// * `base_url` - Service root, e.g. `http://localhost:9191`.
    /// * `timeout_ms` - Request timeout in milliseconds.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::Internal` if the client cannot be created.
    pub fn new(kind: LookupKind, base_url: impl Into<String>, timeout_ms: u64) -> LookupResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| {
                LookupError::internal(kind, format!("Failed to create HTTP client: {}", e))
            })?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            client,
            kind,
            base_url,
            timeout_ms,
        })
    }

    /// Returns the configured timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Returns the base URL.
    #[inline]
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Makes a GET request with query parameters and deserializes the JSON response.
    ///
    /// # Arguments
    ///
    /// * `path` - Path relative to the base URL, starting with `/`.
    /// * `params` - Query parameters.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::Timeout` or `LookupError::Connection` if the request fails.
    /// Returns `LookupError::Remote` on a non-success status.
    /// Returns `LookupError::MalformedResponse` if the response cannot be parsed.
    pub async fn get_with_params<T: DeserializeOwned, P: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        params: &P,
    ) -> LookupResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    /// Handles the HTTP response, checking status and deserializing JSON.
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> LookupResult<T> {
        let status = response.status();

        if status.is_success() {
            response.json::<T>().await.map_err(|e| {
                LookupError::malformed(self.kind, format!("Failed to parse response: {}", e))
            })
        } else {
            let error_body = response.text().await.unwrap_or_default();
            Err(self.map_status_error(status, &error_body))
        }
    }

    /// Maps a reqwest error to a LookupError.
    fn map_reqwest_error(&self, error: reqwest::Error) -> LookupError {
        if error.is_timeout() {
            LookupError::timeout_with_duration(self.kind, self.timeout_ms)
        } else if error.is_connect() {
            LookupError::connection(self.kind, format!("Connection failed: {}", error))
        } else {
            LookupError::connection(self.kind, format!("HTTP request failed: {}", error))
        }
    }

    /// Maps an HTTP status code to a LookupError.
    fn map_status_error(&self, status: StatusCode, body: &str) -> LookupError {
        let reason = if body.is_empty() {
            status.canonical_reason().unwrap_or("unknown").to_string()
        } else {
            body.to_string()
        };
        LookupError::remote(self.kind, status.as_u16(), reason)
    }
}
