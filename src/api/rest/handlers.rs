//! # REST Handlers
//!
//! Request handlers, request/response bodies and HTTP error mapping.

use crate::application::error::ApplicationError;
use crate::application::services::VehicleAggregationService;
use crate::domain::DomainError;
use crate::domain::entities::Vehicle;
use crate::domain::value_objects::{Condition, Coordinates, Details, VehicleId};
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Shared state for all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Vehicle aggregation service.
    pub service: Arc<VehicleAggregationService>,
}

impl AppState {
    /// Creates handler state around a service.
    #[must_use]
    pub fn new(service: Arc<VehicleAggregationService>) -> Self {
        Self { service }
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Coordinates as sent by clients.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LocationRequest {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lon: f64,
}

/// Body of create and update requests.
///
/// Any identifier, price or address a client sends is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CarRequest {
    /// Vehicle condition.
    #[serde(default)]
    pub condition: Condition,
    /// Descriptive attributes.
    pub details: Details,
    /// Position.
    pub location: LocationRequest,
}

impl CarRequest {
    /// Validates the request and builds an unsaved vehicle.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::BadRequest` if the details or coordinates are invalid.
    pub fn into_vehicle(self) -> Result<Vehicle, ApiError> {
        self.details.validate()?;
        let coordinates = Coordinates::new(self.location.lat, self.location.lon)?;
        Ok(Vehicle::new(self.condition, self.details, coordinates))
    }
}

/// Location with its resolved address.
#[derive(Debug, Clone, Serialize)]
pub struct LocationResponse {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lon: f64,
    /// Street address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// City.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// State.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Postal code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
}

/// An enriched vehicle.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarResponse {
    /// Identifier.
    pub id: Option<VehicleId>,
    /// Condition.
    pub condition: Condition,
    /// Descriptive attributes.
    pub details: Details,
    /// Location and resolved address.
    pub location: LocationResponse,
    /// Formatted price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// First persisted.
    pub created_at: Option<DateTime<Utc>>,
    /// Last persisted.
    pub modified_at: Option<DateTime<Utc>>,
}

impl From<Vehicle> for CarResponse {
    fn from(vehicle: Vehicle) -> Self {
        let coordinates = vehicle.coordinates();
        let address = vehicle.location().address();
        let location = LocationResponse {
            lat: coordinates.lat(),
            lon: coordinates.lon(),
            address: address.map(|a| a.street().to_string()),
            city: address.map(|a| a.city().to_string()),
            state: address.map(|a| a.state().to_string()),
            zip: address.map(|a| a.zip().to_string()),
        };

        Self {
            id: vehicle.id(),
            condition: vehicle.condition(),
            details: vehicle.details().clone(),
            location,
            price: vehicle.price().map(str::to_string),
            created_at: vehicle.created_at(),
            modified_at: vehicle.modified_at(),
        }
    }
}

/// Health check body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok` while the process serves requests.
    pub status: String,
}

/// Error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error kind.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

// ============================================================================
// Errors
// ============================================================================

/// HTTP-facing error.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Request body or parameters are invalid.
    #[error("{0}")]
    BadRequest(String),

    /// An upstream lookup did not answer in time.
    #[error("{0}")]
    GatewayTimeout(String),

    /// An upstream lookup failed.
    #[error("{0}")]
    BadGateway(String),

    /// Unexpected server-side failure.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Returns the HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::GatewayTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::BadGateway(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the machine-readable kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::BadRequest(_) => "bad_request",
            Self::GatewayTimeout(_) => "lookup_timeout",
            Self::BadGateway(_) => "lookup_failed",
            Self::Internal(_) => "internal",
        }
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        let message = err.to_string();
        match err {
            ApplicationError::NotFound { .. } => Self::NotFound(message),
            ApplicationError::Lookup(lookup) if lookup.is_timeout() => {
                Self::GatewayTimeout(message)
            }
            ApplicationError::Lookup(_) => Self::BadGateway(message),
            ApplicationError::Storage(storage) => {
                tracing::error!(error = %storage, "record store failure");
                Self::Internal("storage failure".to_string())
            }
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.kind().to_string(),
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// `GET /cars`
///
/// # Errors
///
/// Returns an `ApiError` if the store or any enrichment lookup fails.
pub async fn list_cars(State(state): State<AppState>) -> Result<Json<Vec<CarResponse>>, ApiError> {
    let vehicles = state.service.list().await?;
    Ok(Json(vehicles.into_iter().map(CarResponse::from).collect()))
}

/// `GET /cars/{id}`
///
/// # Errors
///
/// Returns `ApiError::BadRequest` for a malformed ID, `ApiError::NotFound`
/// for an unknown ID, or a lookup/storage error.
pub async fn get_car(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<CarResponse>, ApiError> {
    let Path(id) = id?;
    let vehicle = state.service.find_by_id(VehicleId::new(id)).await?;
    Ok(Json(vehicle.into()))
}

/// `POST /cars`
///
/// # Errors
///
/// Returns `ApiError::BadRequest` for an invalid body, or a lookup/storage error.
pub async fn create_car(
    State(state): State<AppState>,
    payload: Result<Json<CarRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CarResponse>), ApiError> {
    let Json(request) = payload?;
    let vehicle = state.service.save(request.into_vehicle()?).await?;
    Ok((StatusCode::CREATED, Json(vehicle.into())))
}

/// `PUT /cars/{id}`
///
/// # Errors
///
/// Returns `ApiError::NotFound` for an unknown ID, `ApiError::BadRequest`
/// for an invalid body, or a lookup/storage error.
pub async fn update_car(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
    payload: Result<Json<CarRequest>, JsonRejection>,
) -> Result<Json<CarResponse>, ApiError> {
    let Path(id) = id?;
    let Json(request) = payload?;
    let vehicle = request.into_vehicle()?.with_id(VehicleId::new(id));
    let saved = state.service.save(vehicle).await?;
    Ok(Json(saved.into()))
}

/// `DELETE /cars/{id}`
///
/// # Errors
///
/// Returns `ApiError::BadRequest` for a malformed ID, `ApiError::NotFound`
/// for an unknown ID, or a storage error.
pub async fn delete_car(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    state.service.delete(VehicleId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
