//! # REST Routes
//!
//! Router construction.

use crate::api::rest::handlers::{
    AppState, create_car, delete_car, get_car, health, list_cars, update_car,
};
use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builds the REST router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/cars", get(list_cars).post(create_car))
        .route(
            "/cars/{id}",
            get(get_car).put(update_car).delete(delete_car),
        )
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::application::services::{EnrichmentConfig, VehicleAggregationService};
    use crate::domain::value_objects::{Address, Coordinates, Location, VehicleId};
    use crate::infrastructure::lookups::{
        LocationLookup, LookupError, LookupKind, LookupResult, PriceLookup,
    };
    use crate::infrastructure::persistence::{InMemoryVehicleRepository, VehicleRepository};
    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode, header};
    use serde_json::{Value, json};
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    #[derive(Debug)]
    struct FixedPrice;

    #[async_trait]
    impl PriceLookup for FixedPrice {
        async fn get_price(&self, id: VehicleId) -> LookupResult<String> {
            Ok(format!("USD {}", id.get() * 1000))
        }
    }

    #[derive(Debug)]
    struct FixedAddress;

    #[async_trait]
    impl LocationLookup for FixedAddress {
        async fn get_address(&self, coordinates: Coordinates) -> LookupResult<Location> {
            Ok(Location::new(coordinates)
                .with_address(Address::new("1 Main St", "Springfield", "IL", "62701")))
        }
    }

    #[derive(Debug)]
    struct SlowPrice;

    #[async_trait]
    impl PriceLookup for SlowPrice {
        async fn get_price(&self, _id: VehicleId) -> LookupResult<String> {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok("USD 1".to_string())
        }
    }

    #[derive(Debug)]
    struct DownMaps;

    #[async_trait]
    impl LocationLookup for DownMaps {
        async fn get_address(&self, _coordinates: Coordinates) -> LookupResult<Location> {
            Err(LookupError::remote(LookupKind::Location, 503, "unavailable"))
        }
    }

    fn router_with(
        price: Arc<dyn PriceLookup>,
        location: Arc<dyn LocationLookup>,
        config: EnrichmentConfig,
    ) -> (Router, InMemoryVehicleRepository) {
        let repository = InMemoryVehicleRepository::new();
        let service =
            VehicleAggregationService::new(Arc::new(repository.clone()), price, location, config);
        (create_router(AppState::new(Arc::new(service))), repository)
    }

    fn router() -> Router {
        router_with(
            Arc::new(FixedPrice),
            Arc::new(FixedAddress),
            EnrichmentConfig::default(),
        )
        .0
    }

    fn car_body(model: &str, lat: f64, lon: f64) -> Value {
        json!({
            "condition": "USED",
            "details": {
                "manufacturer": { "code": 101, "name": "Chevrolet" },
                "model": model,
                "body": "sedan",
                "mileage": 32280
            },
            "location": { "lat": lat, "lon": lon }
        })
    }

    async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&json).unwrap())
            }
            None => Body::empty(),
        };

        let response = router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (status, body) = send(&router(), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn create_then_get_returns_enriched_car() {
        let router = router();

        let (status, created) = send(
            &router,
            Method::POST,
            "/cars",
            Some(car_body("Impala", 40.73, -73.93)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["id"], 1);
        assert_eq!(created["price"], "USD 1000");
        assert_eq!(created["location"]["city"], "Springfield");
        assert!(created["createdAt"].is_string());

        let (status, fetched) = send(&router, Method::GET, "/cars/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["details"]["model"], "Impala");
        assert_eq!(fetched["details"]["mileage"], 32280);
        assert_eq!(fetched["location"]["lat"], 40.73);
        assert_eq!(fetched["location"]["zip"], "62701");
    }

    #[tokio::test]
    async fn list_returns_all_cars_in_order() {
        let router = router();
        assert_eq!(send(&router, Method::GET, "/cars", None).await.1, json!([]));

        for model in ["A", "B", "C"] {
            send(&router, Method::POST, "/cars", Some(car_body(model, 1.0, 2.0))).await;
        }

        let (status, body) = send(&router, Method::GET, "/cars", None).await;
        assert_eq!(status, StatusCode::OK);
        let models: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|car| car["details"]["model"].as_str().unwrap())
            .collect();
        assert_eq!(models, vec!["A", "B", "C"]);
        assert_eq!(body[2]["price"], "USD 3000");
    }

    #[tokio::test]
    async fn update_replaces_details_and_keeps_id() {
        let router = router();
        send(&router, Method::POST, "/cars", Some(car_body("Model X", 10.0, 20.0))).await;

        let (status, updated) = send(
            &router,
            Method::PUT,
            "/cars/1",
            Some(car_body("Model Y", 11.0, 21.0)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["id"], 1);
        assert_eq!(updated["details"]["model"], "Model Y");
        assert_eq!(updated["location"]["lon"], 21.0);
    }

    #[tokio::test]
    async fn update_of_unknown_car_is_not_found() {
        let (router, repository) = router_with(
            Arc::new(FixedPrice),
            Arc::new(FixedAddress),
            EnrichmentConfig::default(),
        );

        let (status, body) = send(
            &router,
            Method::PUT,
            "/cars/9",
            Some(car_body("Ghost", 0.0, 0.0)),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
        assert_eq!(repository.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn delete_removes_car() {
        let router = router();
        send(&router, Method::POST, "/cars", Some(car_body("Impala", 0.0, 0.0))).await;

        let (status, _) = send(&router, Method::DELETE, "/cars/1", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&router, Method::GET, "/cars/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&router, Method::DELETE, "/cars/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn invalid_input_is_bad_request() {
        let router = router();

        let (status, body) = send(
            &router,
            Method::POST,
            "/cars",
            Some(car_body("Impala", 120.0, 0.0)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");

        let (status, _) = send(&router, Method::POST, "/cars", Some(car_body("  ", 0.0, 0.0))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&router, Method::POST, "/cars", Some(json!({ "model": 1 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_id_renders_json_error() {
        let router = router();

        for (method, body) in [
            (Method::GET, None),
            (Method::PUT, Some(car_body("Impala", 0.0, 0.0))),
            (Method::DELETE, None),
        ] {
            let (status, body) = send(&router, method, "/cars/abc", body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"], "bad_request");
            assert!(body["message"].as_str().unwrap().contains("abc"));
        }
    }

    #[tokio::test]
    async fn lookup_timeout_is_gateway_timeout() {
        let (router, _) = router_with(
            Arc::new(SlowPrice),
            Arc::new(FixedAddress),
            EnrichmentConfig::with_lookup_timeout(20),
        );

        let (status, body) = send(
            &router,
            Method::POST,
            "/cars",
            Some(car_body("Impala", 0.0, 0.0)),
        )
        .await;
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(body["error"], "lookup_timeout");
    }

    #[tokio::test]
    async fn lookup_failure_is_bad_gateway() {
        let (router, repository) = router_with(
            Arc::new(FixedPrice),
            Arc::new(DownMaps),
            EnrichmentConfig::default(),
        );

        let (status, body) = send(
            &router,
            Method::POST,
            "/cars",
            Some(car_body("Impala", 0.0, 0.0)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "lookup_failed");
        assert_eq!(repository.count().await.unwrap(), 1);
    }
}
