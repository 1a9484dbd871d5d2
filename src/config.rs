//! # Configuration
//!
//! Layered application configuration.
//!
//! Sources are applied in order, later ones winning:
//!
//! 1. Built-in defaults
//! 2. An optional TOML file
//! 3. Environment variables prefixed `VEHICLES`, with `__` separating
//!    sections from keys (e.g. `VEHICLES__PRICING__BASE_URL`)
//!
//! # Examples
//!
//! ```
//! use vehicles_api::config::{AppConfig, StorageBackend};
//!
//! let config = AppConfig::from_toml_str(r#"
//!     [server]
//!     port = 9000
//!
//!     [enrichment]
//!     lookup_timeout_ms = 1500
//! "#)?;
//!
//! assert_eq!(config.server.port, 9000);
//! assert_eq!(config.enrichment.lookup_timeout_ms, 1500);
//! assert_eq!(config.storage.backend, StorageBackend::Memory);
//! # Ok::<(), config::ConfigError>(())
//! ```

use crate::application::services::EnrichmentConfig;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use config::builder::DefaultState;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;

/// Environment variable prefix.
const ENV_PREFIX: &str = "VEHICLES";

/// Default pricing service URL.
const DEFAULT_PRICING_URL: &str = "http://localhost:8082";

/// Default maps service URL.
const DEFAULT_MAPS_URL: &str = "http://localhost:9191";

/// Default per-request HTTP timeout in milliseconds.
const DEFAULT_HTTP_TIMEOUT_MS: u64 = 5000;

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
}

impl ServerConfig {
    /// Returns the socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Message` if host and port do not form a valid address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::Message(format!("invalid server address: {}", e)))
    }
}

/// Location of an external lookup service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceEndpoint {
    /// Base URL of the service.
    pub base_url: String,
    /// HTTP request timeout in milliseconds.
    pub timeout_ms: u64,
}

/// Record store backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local in-memory store.
    #[default]
    Memory,
    /// PostgreSQL via sqlx.
    Postgres,
}

/// Record store settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageConfig {
    /// Backend to use.
    pub backend: StorageBackend,
    /// Connection URL, required for `postgres`.
    #[serde(default)]
    pub database_url: Option<String>,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

/// Complete application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// HTTP listener.
    pub server: ServerConfig,
    /// Pricing service.
    pub pricing: ServiceEndpoint,
    /// Maps service.
    pub maps: ServiceEndpoint,
    /// Enrichment behaviour.
    #[serde(default)]
    pub enrichment: EnrichmentConfig,
    /// Record store.
    pub storage: StorageConfig,
    /// Logging.
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Loads configuration from defaults, an optional file and the environment.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a source cannot be read or the merged
    /// values do not deserialize.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Self::defaults()?;
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize::<Self>()?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from defaults overlaid with a TOML document.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the document is invalid.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let config = Self::defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize::<Self>()?;
        config.validate()?;
        Ok(config)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let enrichment = EnrichmentConfig::default();
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("pricing.base_url", DEFAULT_PRICING_URL)?
            .set_default("pricing.timeout_ms", DEFAULT_HTTP_TIMEOUT_MS)?
            .set_default("maps.base_url", DEFAULT_MAPS_URL)?
            .set_default("maps.timeout_ms", DEFAULT_HTTP_TIMEOUT_MS)?
            .set_default("enrichment.lookup_timeout_ms", enrichment.lookup_timeout_ms)?
            .set_default("enrichment.max_concurrency", enrichment.max_concurrency as u64)?
            .set_default("storage.backend", "memory")?
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.backend == StorageBackend::Postgres && self.storage.database_url.is_none() {
            return Err(ConfigError::Message(
                "storage.database_url is required for the postgres backend".to_string(),
            ));
        }
        for (key, value) in [
            ("enrichment.lookup_timeout_ms", self.enrichment.lookup_timeout_ms),
            ("pricing.timeout_ms", self.pricing.timeout_ms),
            ("maps.timeout_ms", self.maps.timeout_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::Message(format!("{} must be at least 1", key)));
            }
        }
        if self.enrichment.max_concurrency == 0 {
            return Err(ConfigError::Message(
                "enrichment.max_concurrency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_sources() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.pricing.base_url, DEFAULT_PRICING_URL);
        assert_eq!(config.maps.base_url, DEFAULT_MAPS_URL);
        assert_eq!(config.enrichment, EnrichmentConfig::default());
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
    }

    #[test]
    fn toml_overrides_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [maps]
            base_url = "http://maps.internal"
            timeout_ms = 750

            [enrichment]
            max_concurrency = 2

            [logging]
            json = true
            "#,
        )
        .unwrap();

        assert_eq!(config.maps.base_url, "http://maps.internal");
        assert_eq!(config.maps.timeout_ms, 750);
        assert_eq!(config.enrichment.max_concurrency, 2);
        assert_eq!(config.enrichment.lookup_timeout_ms, 5000);
        assert!(config.logging.json);
    }

    #[test]
    fn postgres_requires_database_url() {
        let err = AppConfig::from_toml_str(
            r#"
            [storage]
            backend = "postgres"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("database_url"));
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        let result = AppConfig::from_toml_str(
            r#"
            [enrichment]
            max_concurrency = 0
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn zero_timeouts_are_rejected() {
        for (section, key) in [
            ("enrichment", "lookup_timeout_ms"),
            ("pricing", "timeout_ms"),
            ("maps", "timeout_ms"),
        ] {
            let toml = format!("[{}]\n{} = 0\n", section, key);
            let err = AppConfig::from_toml_str(&toml).unwrap_err();
            assert!(err.to_string().contains(&format!("{}.{}", section, key)));
        }
    }

    #[test]
    fn socket_addr_parses() {
        let config = AppConfig::from_toml_str(
            r#"
            [server]
            host = "127.0.0.1"
            port = 3000
            "#,
        )
        .unwrap();
        assert_eq!(config.server.socket_addr().unwrap().port(), 3000);
    }
}
