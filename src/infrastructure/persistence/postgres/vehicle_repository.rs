//! # PostgreSQL Vehicle Repository
//!
//! PostgreSQL implementation of [`VehicleRepository`] using sqlx.
//!
//! Details are stored as JSONB; coordinates as two `DOUBLE PRECISION`
//! columns. There are no columns for price or address.

use crate::domain::entities::Vehicle;
use crate::domain::value_objects::{Condition, Coordinates, Details, VehicleId};
use crate::infrastructure::persistence::traits::{
    RepositoryError, RepositoryResult, VehicleRepository,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS vehicles (
        id          BIGSERIAL PRIMARY KEY,
        condition   TEXT NOT NULL,
        details     JSONB NOT NULL,
        lat         DOUBLE PRECISION NOT NULL,
        lon         DOUBLE PRECISION NOT NULL,
        created_at  TIMESTAMPTZ NOT NULL,
        modified_at TIMESTAMPTZ NOT NULL
    )
"#;

/// PostgreSQL implementation of [`VehicleRepository`].
///
/// # Examples
///
/// ```ignore
/// use sqlx::PgPool;
/// use vehicles_api::infrastructure::persistence::postgres::PostgresVehicleRepository;
///
/// let pool = PgPool::connect("postgres://...").await?;
/// let repo = PostgresVehicleRepository::new(pool);
/// repo.migrate().await?;
/// ```
#[derive(Debug, Clone)]
pub struct PostgresVehicleRepository {
    pool: PgPool,
}

impl PostgresVehicleRepository {
    /// Creates a new PostgreSQL vehicle repository.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to the database at `url`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Connection` if the pool cannot connect.
    pub async fn connect(url: &str) -> RepositoryResult<Self> {
        let pool = PgPool::connect(url)
            .await
            .map_err(|e| RepositoryError::connection(e.to_string()))?;
        Ok(Self::new(pool))
    }

    /// Returns a reference to the connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the `vehicles` table if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Query` if the statement fails.
    pub async fn migrate(&self) -> RepositoryResult<()> {
        sqlx::query(CREATE_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::query(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl VehicleRepository for PostgresVehicleRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Vehicle>> {
        let rows: Vec<VehicleRow> = sqlx::query_as(
            r#"
            SELECT id, condition, details, lat, lon, created_at, modified_at
            FROM vehicles
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::query(e.to_string()))?;

        rows.into_iter().map(VehicleRow::try_into_vehicle).collect()
    }

    async fn find_by_id(&self, id: VehicleId) -> RepositoryResult<Option<Vehicle>> {
        let Some(db_id) = to_db_id(id) else {
            return Ok(None);
        };
        let row: Option<VehicleRow> = sqlx::query_as(
            r#"
            SELECT id, condition, details, lat, lon, created_at, modified_at
            FROM vehicles
            WHERE id = $1
            "#,
        )
        .bind(db_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::query(e.to_string()))?;

        row.map(VehicleRow::try_into_vehicle).transpose()
    }

    async fn save(&self, vehicle: Vehicle) -> RepositoryResult<Vehicle> {
        let vehicle = vehicle.into_persisted();
        let details = serde_json::to_value(vehicle.details())
            .map_err(|e| RepositoryError::serialization(e.to_string()))?;
        let condition = vehicle.condition().as_str();
        let coords = vehicle.coordinates();
        let now = Utc::now();

        let row: VehicleRow = match vehicle.id() {
            None => sqlx::query_as(
                r#"
                INSERT INTO vehicles (condition, details, lat, lon, created_at, modified_at)
                VALUES ($1, $2, $3, $4, $5, $5)
                RETURNING id, condition, details, lat, lon, created_at, modified_at
                "#,
            )
            .bind(condition)
            .bind(&details)
            .bind(coords.lat())
            .bind(coords.lon())
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepositoryError::query(e.to_string()))?,
            Some(id) => sqlx::query_as(
                r#"
                INSERT INTO vehicles (id, condition, details, lat, lon, created_at, modified_at)
                VALUES ($1, $2, $3, $4, $5, $6, $6)
                ON CONFLICT (id) DO UPDATE SET
                    condition = EXCLUDED.condition,
                    details = EXCLUDED.details,
                    lat = EXCLUDED.lat,
                    lon = EXCLUDED.lon,
                    modified_at = EXCLUDED.modified_at
                RETURNING id, condition, details, lat, lon, created_at, modified_at
                "#,
            )
            .bind(to_db_id(id).ok_or_else(|| {
                RepositoryError::serialization(format!("vehicle id {} out of range", id))
            })?)
            .bind(condition)
            .bind(&details)
            .bind(coords.lat())
            .bind(coords.lon())
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepositoryError::query(e.to_string()))?,
        };

        row.try_into_vehicle()
    }

    async fn delete(&self, id: VehicleId) -> RepositoryResult<bool> {
        let Some(db_id) = to_db_id(id) else {
            return Ok(false);
        };
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(db_id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::query(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vehicles")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepositoryError::query(e.to_string()))?;

        Ok(count.max(0) as u64)
    }
}

/// Ids above `i64::MAX` can never have been assigned by `BIGSERIAL`.
fn to_db_id(id: VehicleId) -> Option<i64> {
    i64::try_from(id.get()).ok()
}

/// Row type for vehicle queries.
#[derive(Debug, sqlx::FromRow)]
struct VehicleRow {
    id: i64,
    condition: String,
    details: serde_json::Value,
    lat: f64,
    lon: f64,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
}

impl VehicleRow {
    /// Converts the row into a Vehicle.
    fn try_into_vehicle(self) -> RepositoryResult<Vehicle> {
        let id = u64::try_from(self.id)
            .map(VehicleId::new)
            .map_err(|e| RepositoryError::serialization(e.to_string()))?;
        let condition = self
            .condition
            .parse::<Condition>()
            .map_err(|e| RepositoryError::serialization(e.to_string()))?;
        let details: Details = serde_json::from_value(self.details)
            .map_err(|e| RepositoryError::serialization(e.to_string()))?;
        let coordinates = Coordinates::new(self.lat, self.lon)
            .map_err(|e| RepositoryError::serialization(e.to_string()))?;

        Ok(Vehicle::from_parts(
            id,
            condition,
            details,
            coordinates,
            self.created_at,
            self.modified_at,
        ))
    }
}
