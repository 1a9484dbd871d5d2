//! # REST API
//!
//! REST endpoints using axum for vehicle records.
//!
//! Every response carrying a vehicle has its price and address freshly
//! looked up.
//!
//! # Endpoints
//!
//! ## Cars
//! - `GET /cars` - List all cars
//! - `GET /cars/{id}` - Get car by ID
//! - `POST /cars` - Create a car
//! - `PUT /cars/{id}` - Update a car's details and location
//! - `DELETE /cars/{id}` - Delete a car
//!
//! ## Health
//! - `GET /health` - Health check endpoint
//!
//! # Errors
//!
//! Failures render as `{"error": <kind>, "message": <text>}`:
//!
//! | Kind             | Status |
//! |------------------|--------|
//! | `not_found`      | 404    |
//! | `bad_request`    | 400    |
//! | `lookup_timeout` | 504    |
//! | `lookup_failed`  | 502    |
//! | `internal`       | 500    |
//!
//! # Usage
//!
//! ```ignore
//! use vehicles_api::api::rest::{create_router, AppState};
//! use std::sync::Arc;
//!
//! let state = AppState::new(Arc::new(service));
//! let router = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, router).await?;
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{
    ApiError, AppState, CarRequest, CarResponse, ErrorResponse, HealthResponse, LocationRequest,
    LocationResponse,
};
pub use routes::create_router;
